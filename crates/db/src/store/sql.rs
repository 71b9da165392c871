use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use organimo_core::Product;

use super::{ProductStore, RepositoryError};
use crate::DbPool;

const PRODUCT_COLUMNS: &str =
    "title, slug, description, price, sku, category, image, badges, rating, reviews";

/// Product collection backed by the SQLite pool. Badges are persisted as a
/// JSON array in a text column.
pub struct SqlProductStore {
    pool: DbPool,
}

impl SqlProductStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn insert_many(&self, products: &[Product]) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;
        for product in products {
            let badges = serde_json::to_string(&product.badges)
                .map_err(|error| RepositoryError::Decode(format!("badges encode: {error}")))?;
            sqlx::query(
                "INSERT INTO product \
                 (title, slug, description, price, sku, category, image, badges, rating, reviews) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&product.title)
            .bind(&product.slug)
            .bind(&product.description)
            .bind(product.price)
            .bind(&product.sku)
            .bind(&product.category)
            .bind(&product.image)
            .bind(badges)
            .bind(product.rating)
            .bind(i64::from(product.reviews))
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Up to `limit` table names the store exposes, for diagnostics.
    pub async fn table_names(&self, limit: u32) -> Result<Vec<String>, RepositoryError> {
        let names = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }
}

#[async_trait]
impl ProductStore for SqlProductStore {
    async fn list(&self, category: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        let rows = match category {
            Some(category) => {
                sqlx::query(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM product WHERE category = ?"
                ))
                .bind(category)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM product"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        rows.iter().map(product_from_row).collect()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE slug = ?"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(product_from_row).transpose()
    }
}

fn product_from_row(row: &SqliteRow) -> Result<Product, RepositoryError> {
    let slug: String = row.try_get("slug")?;
    let badges_raw: String = row.try_get("badges")?;
    let badges = serde_json::from_str(&badges_raw).map_err(|error| {
        RepositoryError::Decode(format!("invalid badges column for `{slug}`: {error}"))
    })?;
    let reviews: i64 = row.try_get("reviews")?;

    Ok(Product {
        title: row.try_get("title")?,
        slug,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        sku: row.try_get("sku")?,
        category: row.try_get("category")?,
        image: row.try_get("image")?,
        badges,
        rating: row.try_get("rating")?,
        reviews: u32::try_from(reviews).unwrap_or(0),
    })
}
