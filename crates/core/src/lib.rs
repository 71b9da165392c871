pub mod checkout;
pub mod config;
pub mod domain;

pub use checkout::{checkout_total, CheckoutRequest, LineItem};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::product::Product;
