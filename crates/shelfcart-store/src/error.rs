//! Store error types.

use thiserror::Error;

/// Errors that can occur when using a durable store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing storage could not be read or written.
    #[error("Storage I/O failed for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The key cannot be mapped onto the backing storage.
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// The store refused the operation (quota, disabled storage, ...).
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            key: key.into(),
            source,
        }
    }
}
