//! Shared types for the Abana storefront
//!
//! Document records stored in the managed database, collection names,
//! price helpers and the unified error type used by the client adapter and
//! the site crate.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
