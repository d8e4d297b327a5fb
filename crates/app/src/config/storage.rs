//! Local storage config

use std::path::PathBuf;

use clap::Args;

/// Where the cart and the session are persisted.
#[derive(Debug, Clone, Args)]
pub struct StorageConfig {
    /// Directory holding the persisted cart and session
    #[arg(long, env = "CONFEITARIA_DATA_DIR", default_value = ".confeitaria", global = true)]
    pub data_dir: PathBuf,
}
