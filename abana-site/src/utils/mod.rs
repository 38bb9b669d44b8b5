//! Shared helpers
//!
//! - [`AppError`] / [`AppResult`] (from shared::error)
//! - logging setup
//! - presence checks for form input

pub mod logger;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
