//! Borrow request built from a cart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartEntry;
use crate::error::CartError;
use crate::ids::RequestId;
use crate::request::RequestStatus;

/// A patron's request to borrow the books that were in their cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowRequest {
    /// Unique request identifier.
    pub id: RequestId,
    /// Requested books, in cart order.
    pub books: Vec<CartEntry>,
    /// Optional message for the librarian.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Current lifecycle status.
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BorrowRequest {
    /// Create a waiting request for the given cart contents.
    pub fn from_cart(items: &[CartEntry], note: Option<String>) -> Result<Self, CartError> {
        if items.is_empty() {
            return Err(CartError::EmptyCart);
        }
        let now = Utc::now();
        Ok(Self {
            id: RequestId::generate(),
            books: items.to_vec(),
            note: note.filter(|n| !n.trim().is_empty()),
            status: RequestStatus::Waiting,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn approve(&mut self) -> Result<(), CartError> {
        self.set_status(RequestStatus::Approved)
    }

    pub fn reject(&mut self) -> Result<(), CartError> {
        self.set_status(RequestStatus::Rejected)
    }

    pub fn cancel(&mut self) -> Result<(), CartError> {
        self.set_status(RequestStatus::Cancelled)
    }

    pub fn mark_returned(&mut self) -> Result<(), CartError> {
        self.set_status(RequestStatus::Returned)
    }

    /// Apply a lifecycle transition.
    pub fn set_status(&mut self, next: RequestStatus) -> Result<(), CartError> {
        self.status = self.status.transition(next)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BorrowRequest {
        let items = vec![CartEntry::new(1u64, "A"), CartEntry::new(2u64, "B")];
        BorrowRequest::from_cart(&items, Some("pickup Friday".to_string())).unwrap()
    }

    #[test]
    fn test_from_cart() {
        let req = request();
        assert_eq!(req.status, RequestStatus::Waiting);
        assert_eq!(req.book_count(), 2);
        assert_eq!(req.books[1].title, "B");
        assert_eq!(req.note.as_deref(), Some("pickup Friday"));
        assert_eq!(req.created_at, req.updated_at);
    }

    #[test]
    fn test_empty_cart_rejected() {
        assert!(matches!(
            BorrowRequest::from_cart(&[], None),
            Err(CartError::EmptyCart)
        ));
    }

    #[test]
    fn test_blank_note_dropped() {
        let items = [CartEntry::new(1u64, "A")];
        let req = BorrowRequest::from_cart(&items, Some("  ".into())).unwrap();
        assert!(req.note.is_none());
    }

    #[test]
    fn test_lifecycle() {
        let mut req = request();
        req.approve().unwrap();
        assert_eq!(req.status, RequestStatus::Approved);
        assert!(req.cancel().is_err());
        req.mark_returned().unwrap();
        assert!(req.status.is_terminal());
        assert!(req.approve().is_err());
        assert!(req.updated_at >= req.created_at);
    }

    #[test]
    fn test_cancel_then_reject_fails() {
        let mut req = request();
        req.cancel().unwrap();
        assert!(matches!(
            req.reject(),
            Err(CartError::InvalidStatusTransition { .. })
        ));
        assert_eq!(req.status, RequestStatus::Cancelled);
    }
}
