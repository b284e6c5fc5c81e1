//! 内存存储驱动，用于本地开发和测试

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DocumentStore, StoreError};
use crate::app::products::model::{NewProduct, Product, ProductPatch};

#[derive(Default)]
pub struct MemoryStore {
    products: RwLock<HashMap<String, Product>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, record: NewProduct) -> Result<Product, StoreError> {
        let now = chrono::Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: record.name,
            price: record.price,
            description: record.description,
            created_at: now,
            updated_at: now,
        };

        self.products
            .write()
            .await
            .insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, StoreError> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn update_by_id(
        &self,
        id: &str,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.write().await;
        let Some(product) = products.get_mut(id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(description) = patch.description {
            product.description = Some(description);
        }
        product.updated_at = chrono::Utc::now();

        Ok(Some(product.clone()))
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.products.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> NewProduct {
        NewProduct {
            name: "Widget".to_string(),
            price: 9.5,
            description: Some("A small widget".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_unique_ids() {
        let store = MemoryStore::new();
        let a = store.insert(widget()).await.unwrap();
        let b = store.insert(widget()).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_only_touches_given_fields() {
        let store = MemoryStore::new();
        let created = store.insert(widget()).await.unwrap();

        let patch = ProductPatch {
            price: Some(50.0),
            ..Default::default()
        };
        let updated = store.update_by_id(&created.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.price, 50.0);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let store = MemoryStore::new();

        assert!(store.find_by_id("nope").await.unwrap().is_none());
        assert!(store
            .update_by_id("nope", ProductPatch::default())
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete_by_id("nope").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = MemoryStore::new();
        let created = store.insert(widget()).await.unwrap();

        assert!(store.delete_by_id(&created.id).await.unwrap());
        assert!(!store.delete_by_id(&created.id).await.unwrap());
        assert!(store.find_all().await.unwrap().is_empty());
    }
}
