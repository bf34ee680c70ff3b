//! Borrowing cart and borrow-request lifecycle for a library client.
//!
//! This crate provides:
//!
//! - **Cart**: a bounded, duplicate-free borrowing cart (at most five books)
//!   driven by a pure reducer and written through to a durable store
//! - **Notices**: user-facing success/warning/error messages for every cart
//!   operation
//! - **Requests**: borrow requests built from the cart and their
//!   waiting/approved/rejected/returned/cancelled lifecycle
//!
//! # Example
//!
//! ```rust
//! use shelfcart::prelude::*;
//! use shelfcart_store::MemoryStore;
//!
//! let storage = MemoryStore::new();
//! let mut cart = CartManager::new(storage.clone(), NoticeLog::new());
//! cart.add_to_cart(CartEntry::new(1u64, "Dune").with_field("author", "Frank Herbert"))
//!     .unwrap();
//!
//! // A later session sees the same cart.
//! let restored = CartManager::new(storage, ());
//! assert_eq!(restored.cart_item_count(), 1);
//!
//! let mut cart = restored;
//! let mut ledger = RequestLedger::new(MemoryStore::new());
//! let id = submit_cart(&mut cart, &mut ledger, None).unwrap();
//! assert!(cart.is_empty());
//! assert_eq!(ledger.get(&id).unwrap().unwrap().status, RequestStatus::Waiting);
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod ids;
pub mod notice;
pub mod request;

pub use config::{CartConfig, MAX_CART_ITEMS};
pub use error::{CartError, PersistenceError, SubmitError};
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{CartConfig, MAX_CART_ITEMS};
    pub use crate::error::{CartError, PersistenceError, SubmitError};
    pub use crate::ids::*;

    // Cart
    pub use crate::cart::{
        AddOutcome, CartAction, CartEntry, CartManager, CartPhase, CartState, CartStorage,
        PersistStatus, RemoveOutcome,
    };

    // Notices
    pub use crate::notice::{Notice, NoticeLevel, NoticeLog, NoticeSink, TracingSink};

    // Requests
    pub use crate::request::{
        submit_cart, BorrowRequest, RequestLedger, RequestStatus, RequestSubmitter,
    };
}
