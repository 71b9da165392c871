use async_trait::async_trait;

use organimo_core::Product;

use super::{ProductStore, RepositoryError};
use crate::seed;

/// Fixed single-product catalog served when no store is configured or
/// reachable. Read-only; cannot fail.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackCatalog;

impl FallbackCatalog {
    pub fn products(&self, category: Option<&str>) -> Vec<Product> {
        let product = seed::fallback_product();
        match category {
            Some(filter) if filter != product.category => Vec::new(),
            _ => vec![product],
        }
    }

    pub fn product_by_slug(&self, slug: &str) -> Option<Product> {
        let product = seed::fallback_product();
        (product.slug == slug).then_some(product)
    }
}

#[async_trait]
impl ProductStore for FallbackCatalog {
    async fn list(&self, category: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.products(category))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        Ok(self.product_by_slug(slug))
    }
}
