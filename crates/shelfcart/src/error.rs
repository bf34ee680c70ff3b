//! Cart and request error types.

use shelfcart_store::StoreError;
use thiserror::Error;

use crate::ids::BookId;

/// Errors returned by cart and borrow-request operations.
#[derive(Error, Debug)]
pub enum CartError {
    /// The item cannot be added as given (no usable identifier).
    #[error("Invalid item: {0}")]
    Validation(String),

    /// The book is already in the cart.
    #[error("Book {0} is already in the cart")]
    DuplicateItem(BookId),

    /// The cart already holds the maximum number of books.
    #[error("Cart is full (max {max} books)")]
    CapacityExceeded { max: usize },

    /// A borrow request needs at least one book.
    #[error("Cannot submit an empty cart")]
    EmptyCart,

    /// The request status does not allow this transition.
    #[error("Invalid request status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// The backend refused or failed the submission.
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// The durable store could not be read or written.
///
/// Never fatal: the in-memory cart stays authoritative for the session.
#[derive(Error, Debug)]
#[error("Failed to persist {key}: {source}")]
pub struct PersistenceError {
    /// Storage key involved.
    pub key: String,
    /// Underlying store failure.
    #[source]
    pub source: StoreError,
}

/// Errors reported by a borrow-request backend.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// The backend rejected the request.
    #[error("Borrow request rejected: {0}")]
    Rejected(String),

    /// The backend could not be reached or could not record the request.
    #[error("Borrow service unavailable: {0}")]
    Unavailable(String),

    /// No request with this id is known.
    #[error("Borrow request not found: {0}")]
    NotFound(String),
}

impl From<StoreError> for SubmitError {
    fn from(e: StoreError) -> Self {
        SubmitError::Unavailable(e.to_string())
    }
}
