//! Cart configuration.

use serde::{Deserialize, Serialize};

use crate::error::CartError;

/// Maximum number of books a borrowing cart can hold.
pub const MAX_CART_ITEMS: usize = 5;

/// Storage key the cart is persisted under by default.
pub const DEFAULT_STORAGE_KEY: &str = "borrowCart";

/// Storage key for submitted borrow requests.
pub const DEFAULT_REQUESTS_KEY: &str = "borrowRequests";

/// Configuration for a cart manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Key the serialized cart entries are stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Cart capacity. Only [`MAX_CART_ITEMS`] is accepted.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_capacity() -> usize {
    MAX_CART_ITEMS
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            capacity: default_capacity(),
        }
    }
}

impl CartConfig {
    /// Use a different storage key, e.g. one per patron.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.storage_key.trim().is_empty() {
            return Err(CartError::Validation(
                "storage key must not be empty".to_string(),
            ));
        }
        if self.capacity != MAX_CART_ITEMS {
            return Err(CartError::Validation(format!(
                "cart capacity is fixed at {MAX_CART_ITEMS}, got {}",
                self.capacity
            )));
        }
        Ok(())
    }
}
