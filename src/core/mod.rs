pub mod error;
pub mod extract;
pub mod middleware;
pub mod response;
