//! 路由与应用状态

pub mod products;

use axum::{extract::OriginalUri, middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::core::{
    error::AppError,
    middleware::{json_body_guard, request_logging_middleware},
};
use crate::store::DocumentStore;
use products::ProductService;

/// 存活检查的固定响应
pub const LIVENESS_MESSAGE: &str = "API Server for Express JS is up and running....";

#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            products: ProductService::new(store),
        }
    }
}

/// 构建完整路由表
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness).fallback(route_not_found))
        .nest("/products", products::handler::routes())
        .route("/products/", products::handler::collection())
        .fallback(route_not_found)
        .layer(middleware::from_fn(json_body_guard))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("Route {} not found", uri.path()))
}
