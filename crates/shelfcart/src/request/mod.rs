//! Borrow request module.
//!
//! Contains the request type, its status lifecycle, and cart submission.

mod borrow;
mod status;
mod submit;

pub use borrow::BorrowRequest;
pub use status::RequestStatus;
pub use submit::{submit_cart, RequestLedger, RequestSubmitter};
