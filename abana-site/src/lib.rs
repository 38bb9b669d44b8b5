//! Abana Site - storefront and admin console logic
//!
//! # Module layout
//!
//! ```text
//! abana-site/src/
//! ├── core/      # configuration, shared state
//! ├── cart/      # cart value, persistent store, local slots
//! ├── sync/      # content loading and display models
//! ├── gateway/   # order and contact submissions
//! ├── admin/     # admin console
//! ├── notify.rs  # user-visible notifications
//! ├── money.rs   # amount formatting
//! └── utils/     # logging, form checks
//! ```
//!
//! All backend access goes through [`abana_client::DocumentStore`] and
//! [`abana_client::AuthService`].

pub mod admin;
pub mod cart;
pub mod core;
pub mod gateway;
pub mod money;
pub mod notify;
pub mod sync;
pub mod utils;

// Re-export public types
pub use admin::{AdminConsole, AdminView, Confirm};
pub use cart::{Cart, CartEvent, CartStore, CartView};
pub use crate::core::{Config, SiteState};
pub use gateway::{ContactForm, OrderForm, OrderReceipt, SubmissionGateway};
pub use notify::{Notification, NotificationBus, NotificationLevel};
pub use sync::{ContentSync, MenuSection, StorefrontContent};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read the configuration, create the work directory and
/// start logging
pub fn setup_environment() -> AppResult<Config> {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir).map_err(|e| {
        AppError::config(format!(
            "Cannot create work dir {}: {}",
            config.work_dir.display(),
            e
        ))
    })?;
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    _    _
   / \  | |__   __ _ _ __   __ _
  / _ \ | '_ \ / _` | '_ \ / _` |
 / ___ \| |_) | (_| | | | | (_| |
/_/   \_\_.__/ \__,_|_| |_|\__,_|
    "#
    );
}
