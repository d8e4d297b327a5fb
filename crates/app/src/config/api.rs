//! Backend API config

use std::time::Duration;

use clap::Args;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Backend API settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Base URL of the REST API
    #[arg(long, env = "CONFEITARIA_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(
        long,
        env = "CONFEITARIA_API_TIMEOUT_SECONDS",
        default_value_t = 10u64,
        global = true
    )]
    pub api_timeout_seconds: u64,
}

impl ApiConfig {
    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_seconds)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout_seconds: 10,
        }
    }
}
