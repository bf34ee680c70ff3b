//! Cart manager: the single writer of a session's borrowing cart.

use serde_json::Value;
use shelfcart_store::KvStore;

use crate::cart::{reduce, CartAction, CartEntry, CartPhase, CartState, CartStorage};
use crate::config::{CartConfig, MAX_CART_ITEMS};
use crate::error::{CartError, PersistenceError};
use crate::ids::BookId;
use crate::notice::{Notice, NoticeSink};

/// Result of writing the cart through to durable storage.
#[derive(Debug)]
pub enum PersistStatus {
    /// The new state is on disk.
    Saved,
    /// The write failed; the in-memory cart is still updated.
    Failed(PersistenceError),
}

impl PersistStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistStatus::Saved)
    }
}

/// Outcome of a successful add.
#[derive(Debug)]
pub struct AddOutcome {
    /// Book that was added.
    pub id: BookId,
    /// Item count after the add.
    pub count: usize,
    pub persist: PersistStatus,
}

/// Outcome of a remove. Removes always succeed.
#[derive(Debug)]
pub struct RemoveOutcome {
    /// The entry that was removed, if it was in the cart.
    pub removed: Option<CartEntry>,
    /// Item count after the remove.
    pub count: usize,
    pub persist: PersistStatus,
}

/// Owns the cart state for one session.
///
/// Every mutation goes through the reducer, is written through to storage,
/// and produces a notice. Storage failures are reported but never undo the
/// in-memory change.
///
/// # Example
///
/// ```rust
/// use shelfcart::prelude::*;
/// use shelfcart_store::MemoryStore;
///
/// let notices = NoticeLog::new();
/// let mut cart = CartManager::new(MemoryStore::new(), notices.clone());
///
/// cart.add_to_cart(CartEntry::new(1u64, "Dune")).unwrap();
/// assert!(cart.is_in_cart(&BookId::new("1")));
/// assert_eq!(cart.cart_item_count(), 1);
/// ```
pub struct CartManager<S, N> {
    state: CartState,
    storage: CartStorage<S>,
    notices: N,
}

impl<S: KvStore, N: NoticeSink> CartManager<S, N> {
    /// Create a manager on the default storage key, restoring any saved cart.
    pub fn new(store: S, notices: N) -> Self {
        let storage = CartStorage::new(store, CartConfig::default().storage_key);
        Self::from_storage(storage, notices)
    }

    /// Create a manager with an explicit configuration.
    pub fn with_config(store: S, notices: N, config: &CartConfig) -> Result<Self, CartError> {
        config.validate()?;
        let storage = CartStorage::new(store, config.storage_key.clone());
        Ok(Self::from_storage(storage, notices))
    }

    fn from_storage(storage: CartStorage<S>, notices: N) -> Self {
        let state = CartState::from_items(storage.load());
        tracing::debug!(key = storage.key(), count = state.len(), "restored cart");
        Self {
            state,
            storage,
            notices,
        }
    }

    /// Add a book to the cart.
    ///
    /// Fails without changing anything if the id is blank, the book is
    /// already in the cart, or the cart is full.
    pub fn add_to_cart(&mut self, entry: CartEntry) -> Result<AddOutcome, CartError> {
        if entry.id.is_blank() {
            self.notices.notify(Notice::error("Invalid item: missing book id"));
            return Err(CartError::Validation("book id is missing".to_string()));
        }

        if self.state.contains(&entry.id) {
            self.notices.notify(
                Notice::warning(format!("\"{}\" is already in your cart", entry.display_title()))
                    .about(entry.id.clone()),
            );
            return Err(CartError::DuplicateItem(entry.id));
        }

        if self.state.is_full() {
            self.notices.notify(
                Notice::error(format!(
                    "Your cart is full (max {MAX_CART_ITEMS} books). Remove a book first."
                ))
                .about(entry.id.clone()),
            );
            return Err(CartError::CapacityExceeded {
                max: MAX_CART_ITEMS,
            });
        }

        let id = entry.id.clone();
        let message = format!("\"{}\" added to your borrowing cart", entry.display_title());
        self.dispatch(CartAction::AddItem(entry));
        let persist = self.persist();
        self.notices.notify(Notice::success(message).about(id.clone()));

        Ok(AddOutcome {
            id,
            count: self.state.len(),
            persist,
        })
    }

    /// Add a raw catalog payload, validating its shape first.
    pub fn add_catalog_item(&mut self, item: Value) -> Result<AddOutcome, CartError> {
        match CartEntry::from_value(item) {
            Ok(entry) => self.add_to_cart(entry),
            Err(e) => {
                self.notices.notify(Notice::error(format!("Invalid item: {e}")));
                Err(e)
            }
        }
    }

    /// Remove a book. Removing a book that is not in the cart is not an error.
    pub fn remove_from_cart(&mut self, id: &BookId) -> RemoveOutcome {
        let removed = self.state.get(id).cloned();
        self.dispatch(CartAction::RemoveItem(id.clone()));
        let persist = self.persist();

        let notice = match &removed {
            Some(entry) => Notice::info(format!(
                "\"{}\" removed from your cart",
                entry.display_title()
            )),
            None => Notice::info("Item removed from your cart"),
        };
        self.notices.notify(notice.about(id.clone()));

        RemoveOutcome {
            removed,
            count: self.state.len(),
            persist,
        }
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) -> PersistStatus {
        self.dispatch(CartAction::ClearCart);
        let persist = self.persist();
        self.notices.notify(Notice::info("Borrowing cart cleared"));
        persist
    }

    /// Replace the in-memory cart with what storage currently holds.
    pub fn reload(&mut self) {
        self.state = CartState::from_items(self.storage.load());
    }

    pub fn is_in_cart(&self, id: &BookId) -> bool {
        self.state.contains(id)
    }

    pub fn cart_item_count(&self) -> usize {
        self.state.len()
    }

    pub fn items(&self) -> &[CartEntry] {
        self.state.items()
    }

    pub fn get(&self, id: &BookId) -> Option<&CartEntry> {
        self.state.get(id)
    }

    pub fn phase(&self) -> CartPhase {
        self.state.phase()
    }

    pub fn remaining_capacity(&self) -> usize {
        MAX_CART_ITEMS.saturating_sub(self.state.len())
    }

    pub fn is_full(&self) -> bool {
        self.state.is_full()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// The notice sink this manager reports to.
    pub fn notices(&self) -> &N {
        &self.notices
    }

    /// The storage adapter backing this cart.
    pub fn storage(&self) -> &CartStorage<S> {
        &self.storage
    }

    fn dispatch(&mut self, action: CartAction) {
        let name = action.name();
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        tracing::debug!(action = name, count = self.state.len(), "cart dispatch");
    }

    fn persist(&self) -> PersistStatus {
        match self.storage.save(self.state.items()) {
            Ok(()) => PersistStatus::Saved,
            Err(e) => {
                tracing::warn!(key = %e.key, error = %e.source, "failed to save cart");
                self.notices.notify(Notice::warning(
                    "Could not save your cart; changes will be lost on reload",
                ));
                PersistStatus::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::{NoticeLevel, NoticeLog};
    use shelfcart_store::MemoryStore;

    fn manager() -> (CartManager<MemoryStore, NoticeLog>, MemoryStore, NoticeLog) {
        let store = MemoryStore::new();
        let log = NoticeLog::new();
        (CartManager::new(store.clone(), log.clone()), store, log)
    }

    fn book(id: u64) -> CartEntry {
        CartEntry::new(id, format!("Book {id}"))
    }

    #[test]
    fn test_add_notifies_success_and_persists() {
        let (mut cart, store, log) = manager();
        let outcome = cart.add_to_cart(book(1)).unwrap();

        assert_eq!(outcome.count, 1);
        assert!(outcome.persist.is_saved());
        assert_eq!(log.last().unwrap().level, NoticeLevel::Success);
        assert!(store.get_raw("borrowCart").unwrap().unwrap().contains("Book 1"));
    }

    #[test]
    fn test_blank_id_is_validation_error() {
        let (mut cart, store, log) = manager();
        let err = cart.add_to_cart(CartEntry::new("", "Nameless")).unwrap_err();

        assert!(matches!(err, CartError::Validation(_)));
        assert!(cart.is_empty());
        assert!(store.is_empty());
        assert_eq!(log.last().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_duplicate_warns() {
        let (mut cart, _, log) = manager();
        cart.add_to_cart(book(1)).unwrap();
        let err = cart.add_to_cart(book(1)).unwrap_err();

        assert!(matches!(err, CartError::DuplicateItem(ref id) if id.as_str() == "1"));
        assert_eq!(cart.cart_item_count(), 1);
        let notice = log.last().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("already in your cart"));
    }

    #[test]
    fn test_duplicate_reported_before_capacity() {
        let (mut cart, _, _) = manager();
        for i in 1..=5 {
            cart.add_to_cart(book(i)).unwrap();
        }
        assert!(matches!(
            cart.add_to_cart(book(3)),
            Err(CartError::DuplicateItem(_))
        ));
        assert!(matches!(
            cart.add_to_cart(book(6)),
            Err(CartError::CapacityExceeded { max: 5 })
        ));
    }

    #[test]
    fn test_capacity_error_notice() {
        let (mut cart, _, log) = manager();
        for i in 1..=5 {
            cart.add_to_cart(book(i)).unwrap();
        }
        assert!(cart.is_full());
        assert_eq!(cart.remaining_capacity(), 0);

        cart.add_to_cart(book(6)).unwrap_err();
        let notice = log.last().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.contains("max 5"));
        assert!(!cart.is_in_cart(&BookId::new("6")));
    }

    #[test]
    fn test_remove_reports_title() {
        let (mut cart, _, log) = manager();
        cart.add_to_cart(book(2)).unwrap();

        let outcome = cart.remove_from_cart(&BookId::new("2"));
        assert_eq!(outcome.removed.unwrap().title, "Book 2");
        assert_eq!(outcome.count, 0);
        assert!(log.last().unwrap().message.contains("Book 2"));

        let again = cart.remove_from_cart(&BookId::new("2"));
        assert!(again.removed.is_none());
        assert_eq!(log.last().unwrap().message, "Item removed from your cart");
    }

    #[test]
    fn test_add_catalog_item() {
        let (mut cart, _, log) = manager();
        let item = serde_json::json!({"id": 8, "title": "Beloved", "author": "Toni Morrison"});
        cart.add_catalog_item(item).unwrap();
        assert_eq!(cart.get(&BookId::new("8")).unwrap().author(), Some("Toni Morrison"));

        let err = cart
            .add_catalog_item(serde_json::json!({"title": "Orphan"}))
            .unwrap_err();
        assert!(matches!(err, CartError::Validation(_)));
        assert_eq!(log.last().unwrap().level, NoticeLevel::Error);
        assert_eq!(cart.cart_item_count(), 1);
    }

    #[test]
    fn test_persist_failure_keeps_state() {
        let (mut cart, store, log) = manager();
        store.set_fail_writes(true);

        let outcome = cart.add_to_cart(book(1)).unwrap();
        assert!(matches!(outcome.persist, PersistStatus::Failed(_)));
        assert!(cart.is_in_cart(&BookId::new("1")));

        let levels: Vec<_> = log.snapshot().iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![NoticeLevel::Warning, NoticeLevel::Success]);
    }

    #[test]
    fn test_with_config_uses_key() {
        let store = MemoryStore::new();
        let config = CartConfig::default().with_storage_key("cart:patron-4");
        let mut cart = CartManager::with_config(store.clone(), (), &config).unwrap();
        cart.add_to_cart(book(1)).unwrap();

        assert!(store.get_raw("cart:patron-4").unwrap().is_some());
        assert!(store.get_raw("borrowCart").unwrap().is_none());
        assert_eq!(cart.storage().key(), "cart:patron-4");
    }

    #[test]
    fn test_with_config_rejects_blank_key() {
        let config = CartConfig::default().with_storage_key("");
        assert!(CartManager::with_config(MemoryStore::new(), (), &config).is_err());
    }

    #[test]
    fn test_restores_and_normalizes_saved_cart() {
        let store = MemoryStore::with_entries([(
            "borrowCart",
            concat!(
                r#"[{"id":1,"title":"A"},{"id":1,"title":"A again"},"#,
                r#"{"id":2,"title":"B","cover":"b.png"}]"#,
            ),
        )]);
        let cart = CartManager::new(store, ());
        assert_eq!(cart.cart_item_count(), 2);
        assert_eq!(cart.items()[1].field_str("cover"), Some("b.png"));
        assert_eq!(cart.phase(), CartPhase::Partial);
    }

    #[test]
    fn test_reserved_field_survives_reload() {
        let (mut cart, store, _) = manager();
        cart.add_to_cart(CartEntry::new(1u64, "A").with_field("id", "9")).unwrap();
        cart.add_to_cart(book(2)).unwrap();

        let reloaded = CartManager::new(store, ());
        assert_eq!(reloaded.cart_item_count(), 2);
        assert!(reloaded.is_in_cart(&BookId::new("1")));
        assert!(!reloaded.is_in_cart(&BookId::new("9")));
    }

    #[test]
    fn test_padded_catalog_id_is_a_duplicate() {
        let (mut cart, _, log) = manager();
        cart.add_to_cart(book(1)).unwrap();

        let err = cart
            .add_catalog_item(serde_json::json!({"id": " 1 ", "title": "Again"}))
            .unwrap_err();
        assert!(matches!(err, CartError::DuplicateItem(_)));
        assert_eq!(log.last().unwrap().level, NoticeLevel::Warning);
        assert_eq!(cart.cart_item_count(), 1);
    }
}
