//! Typed durable key-value storage for Shelfcart.
//!
//! The browser client this models keeps its borrowing cart in local storage:
//! a flat string-to-string map that survives reloads. `KvStore` is that
//! contract, with JSON serialization layered on top.
//!
//! # Example
//!
//! ```rust
//! use shelfcart_store::{KvStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set("borrowCart", &vec!["1", "2"]).unwrap();
//!
//! let items: Option<Vec<String>> = store.get("borrowCart").unwrap();
//! assert_eq!(items.unwrap().len(), 2);
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use kv::KvStore;
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, KvStore, MemoryStore, StoreError};
}
