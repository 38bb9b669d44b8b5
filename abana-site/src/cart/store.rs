//! Persistent, observable cart
//!
//! Every mutation writes the whole cart to the `abanaCart` slot and then
//! broadcasts a [`CartEvent`] carrying the new contents, so the cart panel
//! re-renders from events instead of being redrawn by each caller.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::broadcast;

use super::storage::LocalStorage;
use super::view::CartView;
use super::{Cart, CartError};

/// Local storage slot holding the serialized cart
pub const CART_STORAGE_KEY: &str = "abanaCart";

const EVENT_CAPACITY: usize = 32;

/// What changed the cart
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    Restored,
    ItemAdded { name: String },
    QuantityChanged { index: usize },
    Cleared,
}

/// Cart contents after a change
#[derive(Debug, Clone, PartialEq)]
pub struct CartEvent {
    pub change: CartChange,
    pub cart: Cart,
}

pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn LocalStorage>,
    events: broadcast::Sender<CartEvent>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Load the cart saved in `storage`. A missing, unreadable or corrupt
    /// slot starts an empty cart.
    pub fn restore(storage: Arc<dyn LocalStorage>) -> Self {
        let cart = match storage.get_item(CART_STORAGE_KEY) {
            Ok(Some(text)) => Cart::from_json(&text),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Cart slot unreadable, starting empty");
                Cart::new()
            }
        };
        tracing::debug!(lines = cart.len(), "Cart restored");
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let store = Self {
            cart,
            storage,
            events,
        };
        store.announce(CartChange::Restored);
        store
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    pub fn add_item(&mut self, name: impl Into<String>, price: Decimal) {
        let name = name.into();
        self.cart.add_item(name.clone(), price);
        self.commit(CartChange::ItemAdded { name });
    }

    /// See [`Cart::set_quantity`]. Nothing is persisted when the index is
    /// out of range.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> Result<(), CartError> {
        self.cart.set_quantity(index, quantity)?;
        self.commit(CartChange::QuantityChanged { index });
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cart.clear();
        self.commit(CartChange::Cleared);
    }

    pub fn view(&self, currency_symbol: &str) -> CartView {
        CartView::of(&self.cart, currency_symbol)
    }

    fn commit(&self, change: CartChange) {
        self.persist();
        self.announce(change);
    }

    /// Save failures are logged; the in-memory cart stays authoritative.
    fn persist(&self) {
        let result = match self.cart.to_json() {
            Ok(text) => self
                .storage
                .set_item(CART_STORAGE_KEY, &text)
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to save cart");
        }
    }

    fn announce(&self, change: CartChange) {
        let _ = self.events.send(CartEvent {
            change,
            cart: self.cart.clone(),
        });
    }
}
