//! Testimonial Model

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::util::lenient_string;

/// Rating shown when a testimonial has none
pub const DEFAULT_RATING: u8 = 5;
/// Highest rating rendered
pub const MAX_RATING: u8 = 5;

/// Customer testimonial (`testimonials` collection)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: String,
    /// Fractions are truncated; negative or unreadable values read as unset
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: Option<u8>,
}

fn lenient_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let rating = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(rating
        .filter(|r| r.is_finite() && *r >= 0.0)
        .map(|r| r.trunc().min(f64::from(u8::MAX)) as u8))
}

impl Testimonial {
    /// Star count to render: missing or zero means [`DEFAULT_RATING`],
    /// anything above [`MAX_RATING`] is capped.
    pub fn stars(&self) -> u8 {
        match self.rating {
            None | Some(0) => DEFAULT_RATING,
            Some(r) => r.min(MAX_RATING),
        }
    }
}
