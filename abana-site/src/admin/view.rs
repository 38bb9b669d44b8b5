//! Admin console display models

use serde::Serialize;
use shared::models::{CatalogItem, Message};

use super::forms::SettingsForm;
use crate::money::format_amount;
use crate::sync::PRICE_UNAVAILABLE;

pub const NO_MENU_ITEMS: &str = "No menu items yet.";
pub const NO_MESSAGES: &str = "No messages yet.";

const ANONYMOUS: &str = "Anonymous";
const NO_EMAIL: &str = "No email";
const UNKNOWN_DATE: &str = "Unknown";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Which screen the console shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum AdminView {
    Login { error: Option<String> },
    Dashboard(Box<Dashboard>),
}

impl AdminView {
    pub fn is_dashboard(&self) -> bool {
        matches!(self, Self::Dashboard(_))
    }
}

/// Data loaded when an admin signs in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub email: String,
    pub settings: SettingsForm,
    /// `None` when the counts could not be loaded
    pub stats: Option<DashboardStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_messages: usize,
    pub total_menu_items: usize,
}

/// Row in the current menu list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItemRow {
    /// Document id, used for deletion
    pub id: String,
    pub name: String,
    /// `₦1500`
    pub price_label: String,
    pub description: String,
}

impl MenuItemRow {
    pub fn from_item(id: impl Into<String>, item: &CatalogItem, currency_symbol: &str) -> Self {
        Self {
            id: id.into(),
            name: item.name.clone(),
            price_label: item
                .price
                .map(|p| format_amount(currency_symbol, p))
                .unwrap_or_else(|| PRICE_UNAVAILABLE.to_string()),
            description: item.description.clone().unwrap_or_default(),
        }
    }
}

/// Row in the message inbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    /// `2026-05-01 12:00` (UTC) or `Unknown`
    pub date: String,
    pub unread: bool,
    /// Badge text: `contact`, `order` or whatever type was stored
    pub kind: Option<String>,
}

impl MessageRow {
    pub fn from_message(id: impl Into<String>, msg: &Message) -> Self {
        let or = |value: &str, fallback: &str| {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value.to_string()
            }
        };
        Self {
            id: id.into(),
            name: or(&msg.name, ANONYMOUS),
            email: or(&msg.email, NO_EMAIL),
            message: msg.message.clone(),
            date: msg
                .created_at
                .map(|at| at.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
            unread: !msg.read,
            kind: msg.kind.as_ref().map(|k| k.as_str().to_string()),
        }
    }
}
