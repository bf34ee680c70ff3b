//! Turning a cart into a submitted borrow request.

use shelfcart_store::KvStore;

use crate::cart::CartManager;
use crate::config::DEFAULT_REQUESTS_KEY;
use crate::error::{CartError, SubmitError};
use crate::ids::RequestId;
use crate::notice::{Notice, NoticeSink};
use crate::request::{BorrowRequest, RequestStatus};

/// The service that records borrow requests (the library backend).
pub trait RequestSubmitter {
    /// Record a new request, returning the id it is tracked under.
    fn submit(&mut self, request: &BorrowRequest) -> Result<RequestId, SubmitError>;
}

/// Submit the cart's contents as a borrow request.
///
/// The cart is cleared only once the submitter has accepted the request; on
/// any failure it is left exactly as it was.
pub fn submit_cart<S, N, R>(
    cart: &mut CartManager<S, N>,
    submitter: &mut R,
    note: Option<String>,
) -> Result<RequestId, CartError>
where
    S: KvStore,
    N: NoticeSink,
    R: RequestSubmitter + ?Sized,
{
    let request = match BorrowRequest::from_cart(cart.items(), note) {
        Ok(request) => request,
        Err(e) => {
            cart.notices()
                .notify(Notice::warning("Your cart is empty; add books before submitting"));
            return Err(e);
        }
    };

    match submitter.submit(&request) {
        Ok(id) => {
            tracing::info!(request = %id, books = request.book_count(), "borrow request submitted");
            cart.clear_cart();
            cart.notices().notify(Notice::success(format!(
                "Borrow request {id} submitted for {} book(s)",
                request.book_count()
            )));
            Ok(id)
        }
        Err(e) => {
            tracing::warn!(error = %e, "borrow request failed");
            cart.notices()
                .notify(Notice::error(format!("Could not submit your request: {e}")));
            Err(e.into())
        }
    }
}

/// Borrow requests kept in a durable store.
///
/// Stands in for the backend when there is none: it accepts every request
/// and lets callers walk requests through their lifecycle.
#[derive(Debug, Clone)]
pub struct RequestLedger<S> {
    store: S,
    key: String,
}

impl<S: KvStore> RequestLedger<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_REQUESTS_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// All recorded requests, oldest first.
    pub fn list(&self) -> Result<Vec<BorrowRequest>, SubmitError> {
        Ok(self.store.get(&self.key)?.unwrap_or_default())
    }

    /// Requests currently in `status`.
    pub fn with_status(&self, status: RequestStatus) -> Result<Vec<BorrowRequest>, SubmitError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|r| r.status == status)
            .collect())
    }

    pub fn get(&self, id: &RequestId) -> Result<Option<BorrowRequest>, SubmitError> {
        Ok(self.list()?.into_iter().find(|r| &r.id == id))
    }

    /// Move a request to `next`, returning the updated request.
    pub fn update_status(
        &self,
        id: &RequestId,
        next: RequestStatus,
    ) -> Result<BorrowRequest, CartError> {
        let mut requests = self.list()?;
        let request = requests
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| SubmitError::NotFound(id.to_string()))?;
        request.set_status(next)?;
        let updated = request.clone();
        self.store.set(&self.key, &requests).map_err(SubmitError::from)?;
        tracing::info!(request = %id, status = %next, "borrow request updated");
        Ok(updated)
    }
}

impl<S: KvStore> RequestSubmitter for RequestLedger<S> {
    fn submit(&mut self, request: &BorrowRequest) -> Result<RequestId, SubmitError> {
        let mut requests = self.list()?;
        if requests.iter().any(|r| r.id == request.id) {
            return Err(SubmitError::Rejected(format!(
                "request {} already exists",
                request.id
            )));
        }
        requests.push(request.clone());
        self.store.set(&self.key, &requests)?;
        Ok(request.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartEntry;
    use crate::notice::{NoticeLevel, NoticeLog};
    use shelfcart_store::MemoryStore;

    struct Refusing;

    impl RequestSubmitter for Refusing {
        fn submit(&mut self, _request: &BorrowRequest) -> Result<RequestId, SubmitError> {
            Err(SubmitError::Rejected("patron has overdue books".to_string()))
        }
    }

    fn cart_with(n: u64) -> (CartManager<MemoryStore, NoticeLog>, NoticeLog) {
        let log = NoticeLog::new();
        let mut cart = CartManager::new(MemoryStore::new(), log.clone());
        for i in 1..=n {
            cart.add_to_cart(CartEntry::new(i, format!("Book {i}"))).unwrap();
        }
        (cart, log)
    }

    #[test]
    fn test_submit_clears_cart() {
        let (mut cart, log) = cart_with(3);
        let mut ledger = RequestLedger::new(MemoryStore::new());

        let id = submit_cart(&mut cart, &mut ledger, None).unwrap();
        assert!(cart.is_empty());
        assert!(cart.storage().load().is_empty());

        let stored = ledger.get(&id).unwrap().unwrap();
        assert_eq!(stored.book_count(), 3);
        assert_eq!(stored.status, RequestStatus::Waiting);
        assert_eq!(log.last().unwrap().level, NoticeLevel::Success);
    }

    #[test]
    fn test_failed_submit_keeps_cart() {
        let (mut cart, log) = cart_with(2);
        let err = submit_cart(&mut cart, &mut Refusing, None).unwrap_err();

        assert!(matches!(err, CartError::Submit(SubmitError::Rejected(_))));
        assert_eq!(cart.cart_item_count(), 2);
        assert_eq!(log.last().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_empty_cart_not_submitted() {
        let (mut cart, _) = cart_with(0);
        let mut ledger = RequestLedger::new(MemoryStore::new());
        assert!(matches!(
            submit_cart(&mut cart, &mut ledger, None),
            Err(CartError::EmptyCart)
        ));
        assert!(ledger.list().unwrap().is_empty());
    }

    #[test]
    fn test_ledger_status_updates() {
        let (mut cart, _) = cart_with(1);
        let mut ledger = RequestLedger::new(MemoryStore::new());
        let id = submit_cart(&mut cart, &mut ledger, Some("thanks".to_string())).unwrap();

        let approved = ledger.update_status(&id, RequestStatus::Approved).unwrap();
        assert_eq!(approved.status, RequestStatus::Approved);
        assert_eq!(ledger.with_status(RequestStatus::Approved).unwrap().len(), 1);
        assert!(ledger.with_status(RequestStatus::Waiting).unwrap().is_empty());

        assert!(matches!(
            ledger.update_status(&id, RequestStatus::Cancelled),
            Err(CartError::InvalidStatusTransition { .. })
        ));
        assert!(matches!(
            ledger.update_status(&RequestId::new("nope"), RequestStatus::Approved),
            Err(CartError::Submit(SubmitError::NotFound(_)))
        ));
    }

    #[test]
    fn test_ledger_store_failure_is_unavailable() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        let mut ledger = RequestLedger::new(store);
        let request = BorrowRequest::from_cart(&[CartEntry::new(1u64, "A")], None).unwrap();

        assert!(matches!(
            ledger.submit(&request),
            Err(SubmitError::Unavailable(_))
        ));
    }
}
