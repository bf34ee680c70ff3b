//! Key-value store trait with automatic serialization.

use crate::StoreError;
use serde::{de::DeserializeOwned, Serialize};

/// A durable string key-value store.
///
/// Backends only deal in raw strings; the typed `get`/`set` helpers add
/// JSON serialization on top for any `Serialize` / `DeserializeOwned` type.
pub trait KvStore {
    /// Read the raw value stored under `key`.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store a raw value under `key`, replacing any previous value.
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// List all keys currently present.
    fn keys(&self) -> Result<Vec<String>, StoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get_raw(key)?.is_some())
    }

    /// Get a value and deserialize it from JSON.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let items: Option<Vec<CartEntry>> = store.get("borrowCart")?;
    /// ```
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        Self: Sized,
    {
        match self.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize a value to JSON and store it.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// store.set("borrowCart", &items)?;
    /// ```
    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, &raw)
    }
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_raw(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys()
    }
}

/// Helper to build store keys with namespacing.
///
/// # Example
///
/// ```rust
/// let key = shelfcart_store::store_key!("cart", "patron-7");
/// assert_eq!(key, "cart:patron-7");
/// ```
#[macro_export]
macro_rules! store_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
