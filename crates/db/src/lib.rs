pub mod catalog;
pub mod connection;
pub mod migrations;
pub mod seed;
pub mod store;

pub use catalog::{Catalog, StoreStatus};
pub use connection::{connect, connect_with_settings, DbPool};
pub use store::{FallbackCatalog, ProductStore, RepositoryError, SqlProductStore};
