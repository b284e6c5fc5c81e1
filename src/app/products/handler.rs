//! 产品处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, MethodRouter},
    Router,
};

use super::model::{NewProduct, Product, ProductPatch};
use crate::app::{route_not_found, AppState};
use crate::core::{error::AppError, extract::JsonBody, response::MessageResponse};

/// `/products` 子路由，由上层挂载到 `/products`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", collection())
        .route(
            "/:id",
            get(get_product)
                .put(update_product)
                .patch(update_product)
                .delete(delete_product)
                .fallback(route_not_found),
        )
}

/// 集合路径上的方法表，`/products` 与 `/products/` 共用
pub fn collection() -> MethodRouter<AppState> {
    get(list_products)
        .post(create_product)
        .fallback(route_not_found)
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.products.list_products().await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    let product = state.products.get_product(&id).await?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewProduct>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = state.products.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<ProductPatch>,
) -> Result<Json<Product>, AppError> {
    let product = state.products.update_product(&id, patch).await?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.products.delete_product(&id).await?;
    Ok(Json(MessageResponse::new("Product deleted successfully", id)))
}
