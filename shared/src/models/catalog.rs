//! Catalog (menu item) Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::util::{lenient_price, lenient_string, lenient_text, lenient_timestamp};

/// Category tag shown for items that carry none
pub const DEFAULT_CATEGORY: &str = "all";

/// Menu item as stored in `menuItems`
///
/// `price` is read leniently: a number or numeric string is accepted, and
/// anything else leaves it `None` so one bad document cannot hide the rest
/// of the menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, with = "lenient_price")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CatalogItem {
    /// Category tag, falling back to [`DEFAULT_CATEGORY`]
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    /// Price if it can be sold (present and non-negative)
    pub fn sellable_price(&self) -> Option<Decimal> {
        self.price.filter(|p| crate::util::is_valid_price(*p))
    }
}

/// Create menu item payload (admin console)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemCreate {
    pub name: String,
    pub description: String,
    #[serde(with = "crate::util::price")]
    pub price: Decimal,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Client clock at creation
    pub created_at: DateTime<Utc>,
}
