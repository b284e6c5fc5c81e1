//! 文档存储抽象
//!
//! 资源处理层只依赖 [`DocumentStore`]，具体驱动（内存、MongoDB、PostgreSQL）
//! 在启动时按连接串选择，之后以 `Arc<dyn DocumentStore>` 的形式共享。

pub mod memory;
#[cfg(feature = "mongo")]
pub mod mongo;
#[cfg(feature = "postgres")]
pub mod postgres;

use async_trait::async_trait;

use crate::app::products::model::{NewProduct, Product, ProductPatch};

pub use memory::MemoryStore;

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store connection failed: {0}")]
    Connection(String),
    #[error("store query failed: {0}")]
    Query(String),
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Connection(err.to_string())
            }
            other => StoreError::Query(other.to_string()),
        }
    }
}

#[cfg(feature = "mongo")]
impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;
        match *err.kind {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::ConnectionPoolCleared { .. } => StoreError::Connection(err.to_string()),
            _ => StoreError::Query(err.to_string()),
        }
    }
}

/// 产品文档存储
///
/// `id` 由存储分配，对调用方不透明。存储无法解析的 id 视为不存在，返回 `None` / `false`。
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, record: NewProduct) -> Result<Product, StoreError>;

    async fn find_all(&self) -> Result<Vec<Product>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, StoreError>;

    /// 只修改 `patch` 中给出的字段并刷新 `updated_at`
    async fn update_by_id(
        &self,
        id: &str,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError>;

    /// 删除成功返回 `true`，文档不存在返回 `false`
    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError>;
}
