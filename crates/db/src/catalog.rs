//! The catalog handle handed to request handlers.
//!
//! `Catalog` is constructed once at bootstrap as either `Connected` (a live
//! store) or `Fallback` (no database configured, or startup against it
//! failed). Handlers never see store errors: a query failure on a connected
//! catalog degrades to the fallback data for that request.

use serde::Serialize;
use tracing::warn;

use organimo_core::Product;

use crate::store::{FallbackCatalog, ProductStore, SqlProductStore};

pub enum Catalog {
    Connected(SqlProductStore),
    Fallback(FallbackCatalog),
}

/// Diagnostic view of the store, safe to build in any state.
#[derive(Clone, Debug, Serialize)]
pub struct StoreStatus {
    pub configured: bool,
    pub reachable: bool,
    pub tables: Vec<String>,
    pub detail: String,
}

impl Catalog {
    pub fn connected(store: SqlProductStore) -> Self {
        Self::Connected(store)
    }

    pub fn fallback() -> Self {
        Self::Fallback(FallbackCatalog)
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    pub async fn list(&self, category: Option<&str>) -> Vec<Product> {
        match self {
            Self::Connected(store) => match store.list(category).await {
                Ok(products) => products,
                Err(error) => {
                    warn!(
                        event_name = "catalog.store.degraded",
                        operation = "list",
                        error = %error,
                        "store query failed; serving fallback catalog"
                    );
                    FallbackCatalog.products(category)
                }
            },
            Self::Fallback(catalog) => catalog.products(category),
        }
    }

    pub async fn find_by_slug(&self, slug: &str) -> Option<Product> {
        match self {
            Self::Connected(store) => match store.find_by_slug(slug).await {
                Ok(product) => product,
                Err(error) => {
                    warn!(
                        event_name = "catalog.store.degraded",
                        operation = "find_by_slug",
                        slug,
                        error = %error,
                        "store query failed; serving fallback catalog"
                    );
                    FallbackCatalog.product_by_slug(slug)
                }
            },
            Self::Fallback(catalog) => catalog.product_by_slug(slug),
        }
    }

    /// Never errors: failures become descriptive status text.
    pub async fn status(&self) -> StoreStatus {
        match self {
            Self::Connected(store) => match store.table_names(10).await {
                Ok(tables) => StoreStatus {
                    configured: true,
                    reachable: true,
                    tables,
                    detail: "store query succeeded".to_string(),
                },
                Err(error) => StoreStatus {
                    configured: true,
                    reachable: false,
                    tables: Vec::new(),
                    detail: format!("store query failed: {error}"),
                },
            },
            Self::Fallback(_) => StoreStatus {
                configured: false,
                reachable: false,
                tables: Vec::new(),
                detail: "no store configured; serving fallback catalog".to_string(),
            },
        }
    }
}
