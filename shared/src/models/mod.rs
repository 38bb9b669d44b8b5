//! Data models
//!
//! Documents stored in the managed database. Field names are camelCase on
//! the wire to match the documents the admin console and storefront share.

pub mod cart;
pub mod catalog;
pub mod message;
pub mod order;
pub mod settings;
pub mod testimonial;

// Re-exports
pub use cart::*;
pub use catalog::*;
pub use message::*;
pub use order::*;
pub use settings::*;
pub use testimonial::*;

/// Collection names in the document store
pub mod collections {
    /// Holds the singleton settings document
    pub const SETTINGS: &str = "settings";
    /// Menu catalog
    pub const MENU_ITEMS: &str = "menuItems";
    pub const TESTIMONIALS: &str = "testimonials";
    pub const ORDERS: &str = "orders";
    /// Contact messages and order summaries
    pub const MESSAGES: &str = "messages";
}

/// Document id of the singleton settings record
pub const SETTINGS_DOC_ID: &str = "config";

/// Field every timestamped record is created with
pub const CREATED_AT_FIELD: &str = "createdAt";
