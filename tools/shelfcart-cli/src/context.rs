//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use shelfcart::prelude::*;
use shelfcart_store::FileStore;

use crate::config::CliConfig;
use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["shelfcart.toml", ".shelfcart.toml", "shelfcart.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Store every command reads and writes.
    pub store: FileStore,
}

impl Context {
    /// Load config and open the store.
    pub fn load(
        config_path: Option<&Path>,
        data_dir: Option<PathBuf>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let mut config = match config_path {
            Some(path) => CliConfig::load(path)?,
            None => Self::find_config(&cwd)?.unwrap_or_default(),
        };
        if let Some(dir) = data_dir {
            config.storage.dir = dir;
        }

        let store = FileStore::open(&config.storage.dir).with_context(|| {
            format!("Failed to open storage at {}", config.storage.dir.display())
        })?;

        Ok(Self {
            config,
            output,
            store,
        })
    }

    /// Find a config file in the directory tree.
    fn find_config(start: &Path) -> Result<Option<CliConfig>> {
        for dir in start.ancestors() {
            for name in CONFIG_NAMES {
                let path = dir.join(name);
                if path.is_file() {
                    return CliConfig::load(&path).map(Some);
                }
            }
        }
        Ok(None)
    }

    /// Open the session's cart, restoring whatever was saved.
    pub fn cart(&self, notices: NoticeLog) -> Result<CartManager<FileStore, NoticeLog>> {
        CartManager::with_config(self.store.clone(), notices, &self.config.cart_config())
            .context("Invalid cart configuration")
    }

    /// Open the request ledger.
    pub fn ledger(&self) -> RequestLedger<FileStore> {
        RequestLedger::with_key(self.store.clone(), self.config.storage.requests_key.clone())
    }
}
