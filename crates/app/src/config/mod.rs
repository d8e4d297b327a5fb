//! Storefront configuration

use clap::Args;
use thiserror::Error;

use crate::config::{
    api::ApiConfig, checkout::CheckoutConfig, observability::LoggingConfig, storage::StorageConfig,
};

pub mod api;
pub mod checkout;
pub mod observability;
pub mod storage;

/// Confeitaria storefront configuration, read from flags with environment fallbacks.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Backend API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Local persistence settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Checkout destination settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

/// Load `.env` if present. Missing files are ignored.
pub fn load_dotenv() {
    _ = dotenvy::dotenv();
}

/// Errors raised while turning configuration into clients.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The API base URL is not an absolute http(s) URL.
    #[error("invalid API URL {url:?}: {reason}")]
    InvalidApiUrl {
        /// Configured value.
        url: String,

        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
