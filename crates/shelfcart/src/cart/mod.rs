//! Borrowing cart module.
//!
//! Contains the cart entry type, the pure reducer, the storage adapter and
//! the manager that ties them together.

mod entry;
mod manager;
mod reducer;
mod storage;

pub use entry::{is_reserved, CartEntry, RESERVED_FIELDS};
pub use manager::{AddOutcome, CartManager, PersistStatus, RemoveOutcome};
pub use reducer::{reduce, CartAction, CartPhase, CartState};
pub use storage::CartStorage;
