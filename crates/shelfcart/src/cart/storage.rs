//! Durable storage adapter for cart entries.

use serde_json::Value;
use shelfcart_store::{KvStore, StoreError};

use crate::cart::CartEntry;
use crate::error::PersistenceError;

/// Reads and writes the cart's entry list under a single storage key.
#[derive(Debug, Clone)]
pub struct CartStorage<S> {
    store: S,
    key: String,
}

impl<S: KvStore> CartStorage<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The storage key entries live under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load saved entries, or an empty list.
    ///
    /// A missing key, a read failure, unparsable JSON, or JSON that is not an
    /// array all mean "no saved cart". The cause is logged.
    pub fn load(&self) -> Vec<CartEntry> {
        match self.try_load() {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable saved cart");
                Vec::new()
            }
        }
    }

    /// Load saved entries, reporting why they could not be read.
    ///
    /// Array elements that are not usable entries are skipped one by one, so
    /// a single bad element does not cost the rest of the cart.
    pub fn try_load(&self) -> Result<Option<Vec<CartEntry>>, StoreError> {
        let Some(raw) = self.store.get::<Vec<Value>>(&self.key)? else {
            return Ok(None);
        };
        let total = raw.len();
        let items: Vec<CartEntry> = raw
            .into_iter()
            .filter_map(|value| CartEntry::from_value(value).ok())
            .collect();
        if items.len() < total {
            tracing::warn!(
                key = %self.key,
                dropped = total - items.len(),
                "skipping unusable saved cart entries"
            );
        }
        Ok(Some(items))
    }

    /// Write the full entry list.
    pub fn save(&self, items: &[CartEntry]) -> Result<(), PersistenceError> {
        self.store.set(&self.key, items).map_err(|source| PersistenceError {
            key: self.key.clone(),
            source,
        })
    }
}
