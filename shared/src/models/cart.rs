//! Cart Line Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One named entry in the cart with an aggregated quantity
///
/// Serialized as `{"name": .., "price": .., "quantity": ..}`, both in the
/// local cart slot and inside stored orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Unique key within a cart
    pub name: String,
    /// Unit price
    #[serde(with = "crate::util::price")]
    pub price: Decimal,
    /// Always >= 1 while the line is present
    pub quantity: u32,
}

impl CartLine {
    /// New line with quantity 1
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
            quantity: 1,
        }
    }

    /// `price * quantity`, saturating at `Decimal::MAX`
    pub fn subtotal(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Σ price × quantity over `lines`, saturating at `Decimal::MAX`
pub fn lines_total(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.subtotal()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_subtotal() {
        let mut line = CartLine::new("Latte", Decimal::from(1500));
        assert_eq!(line.subtotal(), Decimal::from(1500));
        line.quantity = 3;
        assert_eq!(line.subtotal(), Decimal::from(4500));
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let line = CartLine {
            name: "Gold Latte".into(),
            price: Decimal::from_str("10000000000000000000000000000").unwrap(),
            quantity: 10,
        };
        assert_eq!(line.subtotal(), Decimal::MAX);
        assert_eq!(lines_total(&[line.clone(), line]), Decimal::MAX);
    }

    #[test]
    fn test_wire_shape() {
        let line = CartLine::new("Latte", Decimal::from(1500));
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"{"name":"Latte","price":1500,"quantity":1}"#);
    }
}
