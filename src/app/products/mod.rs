pub mod handler;
pub mod model;
pub mod service;

pub use model::{NewProduct, Product, ProductPatch};
pub use service::ProductService;
