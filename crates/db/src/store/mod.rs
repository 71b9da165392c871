use async_trait::async_trait;
use thiserror::Error;

use organimo_core::Product;

pub mod fallback;
pub mod sql;

pub use fallback::FallbackCatalog;
pub use sql::SqlProductStore;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Read contract shared by the SQL-backed store and the fallback catalog.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, or those whose category equals the filter exactly, in
    /// store order.
    async fn list(&self, category: Option<&str>) -> Result<Vec<Product>, RepositoryError>;

    /// The unique product with this slug, if any. Exact match only.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError>;
}
