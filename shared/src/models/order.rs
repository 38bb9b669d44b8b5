//! Order Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::{CartLine, lines_total};

/// Order status
///
/// Orders are always created `pending`; later transitions happen outside
/// the storefront.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// Order record (`orders` collection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub instructions: String,
    /// Cart snapshot at checkout
    pub items: Vec<CartLine>,
    /// Sum of the snapshot at write time
    #[serde(with = "crate::util::price")]
    pub total: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
    /// Assigned by the backend on write
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Build a pending order from a cart snapshot, computing the total
    pub fn pending(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        instructions: impl Into<String>,
        items: Vec<CartLine>,
    ) -> Self {
        let total = lines_total(&items);
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
            instructions: instructions.into(),
            items,
            total,
            status: OrderStatus::Pending,
            created_at: None,
        }
    }

    /// Whether `total` still matches the item snapshot
    pub fn total_matches_items(&self) -> bool {
        lines_total(&self.items) == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<CartLine> {
        vec![
            CartLine {
                name: "Latte".into(),
                price: Decimal::from(1500),
                quantity: 2,
            },
            CartLine::new("Croissant", Decimal::from(800)),
        ]
    }

    #[test]
    fn test_pending_computes_total() {
        let order = Order::pending("Ada", "080", "ada@example.com", "1 Road", "", lines());
        assert_eq!(order.total, Decimal::from(3800));
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.total_matches_items());
    }

    #[test]
    fn test_serialize_omits_unset_created_at() {
        let order = Order::pending("Ada", "080", "ada@example.com", "1 Road", "ring", lines());
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["status"], "pending");
        assert_eq!(value["total"], 3800);
        assert_eq!(value["items"][0]["quantity"], 2);
        assert!(value.get("createdAt").is_none());
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let status: OrderStatus = serde_json::from_str("\"preparing\"").unwrap();
        assert_eq!(status, OrderStatus::Unknown);
    }
}
