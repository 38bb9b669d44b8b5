//! Presence checks for form input
//!
//! Forms only check that required fields were filled in; content is not
//! validated beyond that.

use shared::error::ErrorCode;

use crate::utils::AppError;

/// True when the value is empty after trimming
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Names of the blank fields among `(name, value)` pairs, in order
pub fn blank_fields<'a>(fields: &[(&'a str, &str)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| *name)
        .collect()
}

/// Fail with `message` when any of the fields is blank
///
/// The error carries the blank field names under the `fields` detail.
pub fn require_fields(fields: &[(&str, &str)], message: &str) -> Result<(), AppError> {
    let missing = blank_fields(fields);
    if missing.is_empty() {
        return Ok(());
    }
    Err(AppError::with_message(ErrorCode::RequiredField, message).with_detail("fields", missing))
}

/// Trimmed copy of an optional text field, `None` when blank
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
