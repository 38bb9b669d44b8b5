//! Price parsing and serde helpers
//!
//! Prices are `Decimal` in memory and plain JSON numbers in stored documents
//! and in the serialized cart. Whole amounts are written as integers so a
//! price of 1500 stays `1500` rather than `1500.0`.
//!
//! Documents are edited by hand in the database console, so every field read
//! from one goes through a lenient reader: a value of the wrong type becomes
//! the field's blank default instead of failing the whole record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;
use std::str::FromStr;

/// Parse a price typed into a form or stored as text.
///
/// Accepts plain and scientific notation after trimming. Does not check the
/// sign; see [`is_valid_price`].
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Highest unit price accepted anywhere. Keeps line and cart totals far
/// inside `Decimal` range and whole amounts exact as JSON integers.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// A price that can be sold: between zero and [`MAX_PRICE`] inclusive.
pub fn is_valid_price(price: Decimal) -> bool {
    (!price.is_sign_negative() || price.is_zero()) && price <= MAX_PRICE
}

/// Read a price out of an arbitrary JSON value (number or numeric string).
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                n.as_f64().and_then(Decimal::from_f64)
            }
        }
        Value::String(s) => parse_price(s),
        _ => None,
    }
}

fn serialize_decimal<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    let normalized = value.normalize();
    if normalized.scale() == 0
        && let Some(whole) = normalized.to_i64()
    {
        return serializer.serialize_i64(whole);
    }
    serializer.serialize_f64(normalized.to_f64().unwrap_or_default())
}

/// `#[serde(with = "price")]` for required prices.
pub mod price {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_decimal(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decimal_from_value(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid price: {}", value)))
    }
}

/// `#[serde(with = "lenient_price")]` for prices read from documents that
/// may hold anything. Unreadable values become `None` instead of failing the
/// whole record.
pub mod lenient_price {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serialize_decimal(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(decimal_from_value))
    }
}

/// Text of a scalar field. Numbers are kept as their decimal text (phone
/// numbers are often stored as numbers); anything else is `None`.
pub fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `deserialize_with` for optional text fields
pub fn lenient_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(text_from_value))
}

/// `deserialize_with` for text fields that default to empty
pub fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// `deserialize_with` for flags; only a JSON boolean counts
pub fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_bool).unwrap_or_default())
}

/// `deserialize_with` for RFC 3339 timestamps
pub fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|ts| ts.to_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("1500"), Some(d("1500")));
        assert_eq!(parse_price(" 12.50 "), Some(d("12.50")));
        assert_eq!(parse_price("1e3"), Some(d("1000")));
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn test_is_valid_price() {
        assert!(is_valid_price(d("0")));
        assert!(is_valid_price(d("1500")));
        assert!(is_valid_price(MAX_PRICE));
        assert!(!is_valid_price(d("-1")));
        assert!(!is_valid_price(d("1000000000.01")));
        assert!(!is_valid_price(d("10000000000000000000000000000")));
    }

    #[test]
    fn test_decimal_from_value() {
        assert_eq!(decimal_from_value(&serde_json::json!(1500)), Some(d("1500")));
        assert_eq!(decimal_from_value(&serde_json::json!(2.5)), Some(d("2.5")));
        assert_eq!(decimal_from_value(&serde_json::json!("700")), Some(d("700")));
        assert_eq!(decimal_from_value(&serde_json::json!("n/a")), None);
        assert_eq!(decimal_from_value(&serde_json::json!(null)), None);
        assert_eq!(decimal_from_value(&serde_json::json!(true)), None);
    }

    #[derive(Debug, Default, serde::Deserialize)]
    struct Loose {
        #[serde(default, deserialize_with = "lenient_text")]
        phone: Option<String>,
        #[serde(default, deserialize_with = "lenient_string")]
        name: String,
        #[serde(default, deserialize_with = "lenient_bool")]
        read: bool,
        #[serde(default, deserialize_with = "lenient_timestamp")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_lenient_fields_never_fail_the_record() {
        let loose: Loose = serde_json::from_str(
            r#"{"phone":2348000000000,"name":{"first":"Ada"},"read":"yes","at":"yesterday"}"#,
        )
        .unwrap();
        assert_eq!(loose.phone.as_deref(), Some("2348000000000"));
        assert_eq!(loose.name, "");
        assert!(!loose.read);
        assert!(loose.at.is_none());

        let loose: Loose =
            serde_json::from_str(r#"{"name":"Ada","read":true,"at":"2026-05-01T12:00:00Z"}"#)
                .unwrap();
        assert_eq!(loose.name, "Ada");
        assert!(loose.read);
        assert!(loose.at.is_some());
        assert!(loose.phone.is_none());
    }

    #[derive(Debug, serde::Serialize, serde::Deserialize)]
    struct Priced {
        #[serde(with = "price")]
        price: Decimal,
    }

    #[test]
    fn test_whole_price_serializes_as_integer() {
        let json = serde_json::to_string(&Priced { price: d("1500.00") }).unwrap();
        assert_eq!(json, r#"{"price":1500}"#);
        let json = serde_json::to_string(&Priced { price: d("2.5") }).unwrap();
        assert_eq!(json, r#"{"price":2.5}"#);
    }

    #[test]
    fn test_required_price_rejects_garbage() {
        assert!(serde_json::from_str::<Priced>(r#"{"price":"soon"}"#).is_err());
        let p: Priced = serde_json::from_str(r#"{"price":"900"}"#).unwrap();
        assert_eq!(p.price, d("900"));
    }
}
