//! # Products API
//!
//! 基于 Axum 的产品 REST 服务：
//! - `GET /` 存活检查
//! - `/products` 下的增删改查，数据保存在可替换的文档存储中（内存、MongoDB、PostgreSQL）

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;
pub mod store;

pub use app::{build_router, AppState};
pub use config::AppConfig;
