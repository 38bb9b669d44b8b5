//! Storefront form state

use serde::{Deserialize, Serialize};

use crate::utils::validation::require_fields;
use crate::utils::AppResult;

/// Shown when an order form is incomplete
pub const ORDER_FIELDS_MISSING: &str = "Please fill in all required fields";
/// Shown when the contact form is incomplete
pub const CONTACT_FIELDS_MISSING: &str = "Please fill in all fields";

/// Delivery details typed by the visitor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Optional
    pub instructions: String,
}

impl OrderForm {
    /// Name, phone, email and address must be filled in
    pub fn validate(&self) -> AppResult<()> {
        require_fields(
            &[
                ("name", self.name.as_str()),
                ("phone", self.phone.as_str()),
                ("email", self.email.as_str()),
                ("address", self.address.as_str()),
            ],
            ORDER_FIELDS_MISSING,
        )
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> AppResult<()> {
        require_fields(
            &[
                ("name", self.name.as_str()),
                ("email", self.email.as_str()),
                ("message", self.message.as_str()),
            ],
            CONTACT_FIELDS_MISSING,
        )
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
