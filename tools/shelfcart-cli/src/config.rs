//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shelfcart::config::{DEFAULT_REQUESTS_KEY, DEFAULT_STORAGE_KEY};
use shelfcart::CartConfig;

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where and under which keys state is stored.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Diagnostics.
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Cart settings derived from this file.
    pub fn cart_config(&self) -> CartConfig {
        CartConfig::default().with_storage_key(self.storage.cart_key.clone())
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per storage key.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Key of the borrowing cart.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,

    /// Key of the submitted request list.
    #[serde(default = "default_requests_key")]
    pub requests_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            cart_key: default_cart_key(),
            requests_key: default_requests_key(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from(".shelfcart")
}

fn default_cart_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_requests_key() -> String {
    DEFAULT_REQUESTS_KEY.to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}
