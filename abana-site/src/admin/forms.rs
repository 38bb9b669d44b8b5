//! Admin console form state

use serde::{Deserialize, Serialize};
use shared::models::SiteSettingsUpdate;

/// Settings editor fields; saved as a merge write
pub type SettingsForm = SiteSettingsUpdate;

/// New menu item editor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemForm {
    pub name: String,
    pub description: String,
    /// Raw text from the price input
    pub price: String,
    /// Blank uses the configured default category
    pub category: String,
    pub image_url: String,
}

impl MenuItemForm {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            ..Default::default()
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
