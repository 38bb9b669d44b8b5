//! Display strings for the cart panel

use serde::Serialize;

use super::Cart;
use crate::money::format_amount;

/// Text shown in place of the line list when the cart is empty
pub const EMPTY_CART_TEXT: &str = "Your cart is empty";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    /// Position for quantity buttons
    pub index: usize,
    pub name: String,
    /// `₦1500 x 2`
    pub price_label: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    /// `₦3000`, or `₦0` when empty
    pub total_label: String,
    pub item_count: u32,
    /// Set only when there are no lines
    pub empty_text: Option<&'static str>,
}

impl CartView {
    pub fn of(cart: &Cart, currency_symbol: &str) -> Self {
        let lines = cart
            .lines()
            .iter()
            .enumerate()
            .map(|(index, line)| CartLineView {
                index,
                name: line.name.clone(),
                price_label: format!(
                    "{} x {}",
                    format_amount(currency_symbol, line.price),
                    line.quantity
                ),
                quantity: line.quantity,
            })
            .collect();
        Self {
            lines,
            total_label: format_amount(currency_symbol, cart.total()),
            item_count: cart.item_count(),
            empty_text: cart.is_empty().then_some(EMPTY_CART_TEXT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_view_labels() {
        let mut cart = Cart::new();
        cart.add_item("Latte", Decimal::from(1500));
        cart.add_item("Latte", Decimal::from(1500));
        let view = CartView::of(&cart, "₦");

        assert_eq!(view.lines[0].price_label, "₦1500 x 2");
        assert_eq!(view.total_label, "₦3000");
        assert_eq!(view.item_count, 2);
        assert!(view.empty_text.is_none());
    }

    #[test]
    fn test_empty_view() {
        let view = CartView::of(&Cart::new(), "₦");
        assert!(view.lines.is_empty());
        assert_eq!(view.total_label, "₦0");
        assert_eq!(view.empty_text, Some("Your cart is empty"));
    }
}
