//! 产品业务服务

use std::sync::Arc;
use validator::Validate;

use super::model::{NewProduct, Product, ProductPatch};
use crate::core::error::AppError;
use crate::store::DocumentStore;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn DocumentStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create_product(&self, payload: NewProduct) -> Result<Product, AppError> {
        let payload = payload.normalized();
        payload.validate()?;

        Ok(self.store.insert(payload).await?)
    }

    pub async fn update_product(&self, id: &str, patch: ProductPatch) -> Result<Product, AppError> {
        let patch = patch.normalized();
        patch.validate()?;

        // 空补丁不改动文档，直接返回当前状态
        if patch.is_empty() {
            return self.get_product(id).await;
        }

        self.store
            .update_by_id(id, patch)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), AppError> {
        if self.store.delete_by_id(id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Product {id} not found"))
}
