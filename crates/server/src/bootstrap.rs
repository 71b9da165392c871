use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::{info, warn};

use organimo_core::config::{AppConfig, ConfigError, DatabaseConfig, LoadOptions};
use organimo_db::{connect_with_settings, migrations, seed, Catalog, SqlProductStore};

pub struct Application {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, ConfigError> {
    let config = AppConfig::load(options)?;
    Ok(bootstrap_with_config(config).await)
}

/// Build the application from an already-loaded config. Store failures are
/// never fatal here: any failure to connect, migrate, or seed leaves the
/// service in fallback mode so the API stays up without a database.
pub async fn bootstrap_with_config(config: AppConfig) -> Application {
    let catalog = match &config.database.url {
        Some(url) => open_catalog(url.expose_secret(), &config.database).await,
        None => {
            info!(
                event_name = "system.bootstrap.no_database",
                "no database configured; serving fallback catalog"
            );
            Catalog::fallback()
        }
    };

    Application { config, catalog: Arc::new(catalog) }
}

async fn open_catalog(url: &str, database: &DatabaseConfig) -> Catalog {
    let pool = match connect_with_settings(url, database.max_connections, database.timeout_secs)
        .await
    {
        Ok(pool) => pool,
        Err(error) => {
            warn!(
                event_name = "system.bootstrap.store_unavailable",
                error = %error,
                "database connection failed; serving fallback catalog"
            );
            return Catalog::fallback();
        }
    };

    if let Err(error) = migrations::run_pending(&pool).await {
        warn!(
            event_name = "system.bootstrap.store_unavailable",
            error = %error,
            "database migration failed; serving fallback catalog"
        );
        return Catalog::fallback();
    }

    let store = SqlProductStore::new(pool);
    match seed::seed_if_empty(&store).await {
        Ok(0) => {
            info!(event_name = "system.bootstrap.catalog_ready", "catalog already populated");
        }
        Ok(inserted) => {
            info!(
                event_name = "system.bootstrap.catalog_seeded",
                inserted,
                "seeded sample catalog into empty store"
            );
        }
        Err(error) => {
            warn!(
                event_name = "system.bootstrap.store_unavailable",
                error = %error,
                "catalog seed failed; serving fallback catalog"
            );
            return Catalog::fallback();
        }
    }

    Catalog::connected(store)
}
