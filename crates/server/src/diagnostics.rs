//! `GET /test` — store connectivity diagnostics.
//!
//! Reports liveness, store reachability, and whether the two
//! environment-derived configuration values (connection string and database
//! name) are present. Presence only: actual values are never included.
//! Always answers 200, whatever state the store is in.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::routes::ApiState;

#[derive(Clone, Debug, Serialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
    pub checked_at: String,
}

pub async fn test_database(State(state): State<ApiState>) -> Json<DiagnosticsReport> {
    let status = state.catalog.status().await;

    let database = if !status.configured {
        "not available".to_string()
    } else if status.reachable {
        "connected and working".to_string()
    } else {
        status.detail.clone()
    };

    Json(DiagnosticsReport {
        backend: "running".to_string(),
        database,
        database_url: presence(state.database_url_configured),
        database_name: presence(state.database_name_configured),
        connection_status: if status.reachable { "connected" } else { "not connected" }
            .to_string(),
        collections: status.tables,
        checked_at: Utc::now().to_rfc3339(),
    })
}

fn presence(configured: bool) -> String {
    if configured { "set" } else { "not set" }.to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::State;
    use axum::Json;

    use organimo_db::{connect_with_settings, migrations, seed, Catalog, SqlProductStore};

    use super::test_database;
    use crate::routes::ApiState;

    async fn connected_state() -> ApiState {
        let pool = connect_with_settings("sqlite::memory:", 1, 5).await.expect("pool");
        migrations::run_pending(&pool).await.expect("migrations");
        let store = SqlProductStore::new(pool);
        seed::seed_if_empty(&store).await.expect("seed");
        ApiState {
            catalog: Arc::new(Catalog::connected(store)),
            database_url_configured: true,
            database_name_configured: true,
        }
    }

    #[tokio::test]
    async fn reports_a_working_store() {
        let Json(report) = test_database(State(connected_state().await)).await;

        assert_eq!(report.backend, "running");
        assert_eq!(report.database, "connected and working");
        assert_eq!(report.database_url, "set");
        assert_eq!(report.database_name, "set");
        assert_eq!(report.connection_status, "connected");
        assert!(report.collections.iter().any(|name| name == "product"));
        assert!(report.collections.len() <= 10);
    }

    #[tokio::test]
    async fn reports_fallback_mode_without_raising() {
        let state = ApiState {
            catalog: Arc::new(Catalog::fallback()),
            database_url_configured: false,
            database_name_configured: false,
        };

        let Json(report) = test_database(State(state)).await;

        assert_eq!(report.backend, "running");
        assert_eq!(report.database, "not available");
        assert_eq!(report.database_url, "not set");
        assert_eq!(report.database_name, "not set");
        assert_eq!(report.connection_status, "not connected");
        assert!(report.collections.is_empty());
    }

    #[tokio::test]
    async fn reports_a_configured_but_unreachable_store() {
        let state = connected_state().await;
        if let Catalog::Connected(store) = state.catalog.as_ref() {
            store.pool().close().await;
        }

        let Json(report) = test_database(State(state)).await;

        assert_eq!(report.backend, "running");
        assert!(report.database.contains("store query failed"));
        assert_eq!(report.database_url, "set");
        assert_eq!(report.connection_status, "not connected");
        assert!(report.collections.is_empty());
    }
}
