pub mod app_config;
pub mod config;
pub mod customer;
pub mod shop;

use thiserror::Error;

pub use app_config::{AppConfig, CorsPolicy, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use customer::{composite_key, fold_metafields, Customer, Metafield, MetafieldMap};
pub use shop::ShopDomain;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid shop domain \"{domain}\": {reason}")]
    InvalidShopDomain { domain: String, reason: &'static str },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
