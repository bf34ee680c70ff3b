//! Cart state and its pure transition function.

use serde::{Deserialize, Serialize};

use crate::cart::CartEntry;
use crate::config::MAX_CART_ITEMS;
use crate::ids::BookId;

/// Cart contents: unique by id, insertion ordered, at most `MAX_CART_ITEMS`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CartState {
    items: Vec<CartEntry>,
}

/// Occupancy phase of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartPhase {
    /// No items.
    Empty,
    /// Between one item and one short of full.
    Partial,
    /// At capacity; adds are blocked.
    Full,
}

impl CartPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartPhase::Empty => "empty",
            CartPhase::Partial => "partial",
            CartPhase::Full => "full",
        }
    }
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from restored entries, enforcing the cart invariants.
    ///
    /// Entries with a blank id and repeated ids are dropped (first one wins),
    /// then the list is cut to capacity.
    pub fn from_items(items: impl IntoIterator<Item = CartEntry>) -> Self {
        let mut state = Self::new();
        for entry in items {
            if entry.id.is_blank() || state.contains(&entry.id) {
                continue;
            }
            if state.items.len() >= MAX_CART_ITEMS {
                break;
            }
            state.items.push(entry);
        }
        state
    }

    pub fn items(&self) -> &[CartEntry] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartEntry> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_CART_ITEMS
    }

    pub fn contains(&self, id: &BookId) -> bool {
        self.items.iter().any(|e| &e.id == id)
    }

    pub fn get(&self, id: &BookId) -> Option<&CartEntry> {
        self.items.iter().find(|e| &e.id == id)
    }

    pub fn phase(&self) -> CartPhase {
        match self.items.len() {
            0 => CartPhase::Empty,
            n if n >= MAX_CART_ITEMS => CartPhase::Full,
            _ => CartPhase::Partial,
        }
    }
}

/// A change requested of the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Append an entry unless it is already present or the cart is full.
    AddItem(CartEntry),
    /// Drop the entry with this id, if present.
    RemoveItem(BookId),
    /// Drop everything.
    ClearCart,
}

impl CartAction {
    pub fn name(&self) -> &'static str {
        match self {
            CartAction::AddItem(_) => "add_item",
            CartAction::RemoveItem(_) => "remove_item",
            CartAction::ClearCart => "clear_cart",
        }
    }
}

/// Apply an action to a state.
///
/// Total and side-effect free. A refused add returns the state unchanged;
/// deciding why it was refused is up to the caller.
pub fn reduce(mut state: CartState, action: CartAction) -> CartState {
    match action {
        CartAction::AddItem(entry) => {
            if !state.contains(&entry.id) && !state.is_full() {
                state.items.push(entry);
            }
        }
        CartAction::RemoveItem(id) => state.items.retain(|e| e.id != id),
        CartAction::ClearCart => state.items.clear(),
    }
    state
}
