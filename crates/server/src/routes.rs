//! Storefront API routes.
//!
//! - `GET  /`                      — liveness message
//! - `GET  /api/products`          — list products, optional `?category=` filter
//! - `GET  /api/products/{slug}`   — single product lookup
//! - `POST /api/checkout`          — placeholder checkout, returns a total
//! - `GET  /test`                  — store diagnostics (see `diagnostics`)

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use organimo_core::checkout::{checkout_total, CheckoutRequest};
use organimo_core::Product;
use organimo_db::Catalog;

use crate::bootstrap::Application;
use crate::diagnostics;

#[derive(Clone)]
pub struct ApiState {
    pub catalog: Arc<Catalog>,
    pub database_url_configured: bool,
    pub database_name_configured: bool,
}

impl ApiState {
    pub fn new(app: &Application) -> Self {
        Self {
            catalog: app.catalog.clone(),
            database_url_configured: app.config.database.url.is_some(),
            database_name_configured: app.config.database.name.is_some(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub total: f64,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/api/products", get(list_products))
        .route("/api/products/{slug}", get(get_product))
        .route("/api/checkout", post(checkout))
        .route("/test", get(diagnostics::test_database))
        .with_state(state)
}

pub async fn read_root() -> Json<RootResponse> {
    Json(RootResponse { message: "Organimo® API is running".to_string() })
}

/// Never an error status: an unavailable store degrades to fallback data
/// inside the catalog. An empty `?category=` means no filter.
pub async fn list_products(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Product>> {
    let category = query.category.as_deref().filter(|category| !category.is_empty());
    let products = state.catalog.list(category).await;
    Json(products)
}

pub async fn get_product(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>, (StatusCode, Json<ApiError>)> {
    match state.catalog.find_by_slug(&slug).await {
        Some(product) => Ok(Json(product)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError { detail: "Product not found".to_string() }),
        )),
    }
}

/// Placeholder checkout: computes a total and acknowledges. No payment
/// integration, no order persistence, no inventory adjustment.
pub async fn checkout(Json(payload): Json<CheckoutRequest>) -> Json<CheckoutResponse> {
    let total = checkout_total(&payload.items);
    Json(CheckoutResponse {
        status: "ok",
        message: "Checkout initialized",
        total: total.to_f64().unwrap_or(0.0),
    })
}
