//! MongoDB 存储驱动
//!
//! 文档保存在 `products` 集合，`_id` 为 ObjectId，对外以十六进制字符串表示。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime as BsonDateTime},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Client, Collection,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{DocumentStore, StoreError};
use crate::app::products::model::{NewProduct, Product, ProductPatch};

const COLLECTION: &str = "products";

#[derive(Debug, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "createdAt")]
    created_at: BsonDateTime,
    #[serde(rename = "updatedAt")]
    updated_at: BsonDateTime,
}

impl From<ProductDocument> for Product {
    fn from(document: ProductDocument) -> Self {
        Product {
            id: document.id.to_hex(),
            name: document.name,
            price: document.price,
            description: document.description,
            created_at: to_chrono(document.created_at),
            updated_at: to_chrono(document.updated_at),
        }
    }
}

fn to_chrono(value: BsonDateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

pub struct MongoStore {
    collection: Collection<ProductDocument>,
}

impl MongoStore {
    /// 建立连接并 ping 一次，连接不可用时立即返回错误
    pub async fn connect(uri: &str, default_database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(default_database));

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        info!("Connected to MongoDB database: {}", database.name());

        Ok(Self {
            collection: database.collection(COLLECTION),
        })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert(&self, record: NewProduct) -> Result<Product, StoreError> {
        let now = BsonDateTime::now();
        let document = ProductDocument {
            id: ObjectId::new(),
            name: record.name,
            price: record.price,
            description: record.description,
            created_at: now,
            updated_at: now,
        };

        self.collection.insert_one(&document).await?;
        Ok(document.into())
    }

    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let document = self.collection.find_one(doc! { "_id": oid }).await?;
        Ok(document.map(Product::from))
    }

    async fn update_by_id(
        &self,
        id: &str,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let mut set = doc! { "updatedAt": BsonDateTime::now() };
        if let Some(name) = patch.name {
            set.insert("name", name);
        }
        if let Some(price) = patch.price {
            set.insert("price", price);
        }
        if let Some(description) = patch.description {
            set.insert("description", description);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let document = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .with_options(options)
            .await?;

        Ok(document.map(Product::from))
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };

        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count > 0)
    }
}
