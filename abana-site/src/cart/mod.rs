//! Visitor cart
//!
//! [`Cart`] is the pure value: lines merged by item name, in first-add
//! order. [`CartStore`] owns one, keeps it in a local storage slot and
//! announces every change.

pub mod storage;
pub mod store;
pub mod view;

use rust_decimal::Decimal;
use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use shared::models::{CartLine, lines_total};
use shared::util::is_valid_price;
use thiserror::Error;

pub use storage::{LocalStorage, MemoryLocalStorage, RedbLocalStorage, StorageError};
pub use store::{CART_STORAGE_KEY, CartChange, CartEvent, CartStore};
pub use view::{CartLineView, CartView, EMPTY_CART_TEXT};

/// Cart operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("No cart line at index {index} (cart has {len})")]
    LineNotFound { index: usize, len: usize },
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::LineNotFound { index, .. } => {
                AppError::with_message(ErrorCode::CartLineNotFound, err.to_string())
                    .with_detail("index", index)
            }
        }
    }
}

/// Ordered cart lines, unique by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Number of units across all lines
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Σ price × quantity
    pub fn total(&self) -> Decimal {
        lines_total(&self.lines)
    }

    /// Add one unit. An existing line with the same name gains a unit and
    /// keeps its original price.
    pub fn add_item(&mut self, name: impl Into<String>, price: Decimal) {
        let name = name.into();
        match self.lines.iter_mut().find(|l| l.name == name) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::new(name, price)),
        }
    }

    /// Overwrite the quantity of the line at `index`; below 1 removes it.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> Result<(), CartError> {
        if index >= self.lines.len() {
            return Err(CartError::LineNotFound {
                index,
                len: self.lines.len(),
            });
        }
        if quantity < 1 {
            self.lines.remove(index);
        } else {
            self.lines[index].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Stored form: JSON array of `{name, price, quantity}`
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.lines)
    }

    /// Best-effort restore. Unreadable text yields an empty cart; unreadable,
    /// zero-quantity or out-of-range-price lines are dropped and repeated
    /// names merged.
    pub fn from_json(text: &str) -> Self {
        let entries = match serde_json::from_str::<Vec<Value>>(text) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored cart");
                return Self::default();
            }
        };

        let mut cart = Self::default();
        for entry in entries {
            let line: CartLine = match serde_json::from_value(entry) {
                Ok(line) => line,
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unreadable cart line");
                    continue;
                }
            };
            if line.quantity == 0 {
                continue;
            }
            if !is_valid_price(line.price) {
                tracing::debug!(name = %line.name, price = %line.price, "Skipping cart line with out-of-range price");
                continue;
            }
            match cart.lines.iter_mut().find(|l| l.name == line.name) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity)
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }
}
