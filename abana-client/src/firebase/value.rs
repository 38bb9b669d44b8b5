//! Firestore typed value codec
//!
//! Firestore REST represents every field as a one-key object naming its type
//! (`{"stringValue": "x"}`, `{"integerValue": "12"}`, ...). Records in this
//! crate are plain JSON, so values are converted at the HTTP boundary.
//!
//! Only the record timestamp fields ([`TIMESTAMP_FIELDS`]) are written as
//! `timestampValue`, and only when they hold a full RFC 3339 date-time. Every
//! other string stays a `stringValue`, even one that happens to look like a
//! date. Timestamps read back as RFC 3339 strings, so `chrono` fields survive a
//! round trip.

use chrono::{DateTime, SecondsFormat};
use serde_json::{Map, Number, Value, json};

use crate::document::Fields;

/// Field names stored as Firestore timestamps
pub const TIMESTAMP_FIELDS: &[&str] = &["createdAt", "updatedAt"];

/// Encode plain JSON into a Firestore value
pub fn encode(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else if let Some(u) = n.as_u64() {
                // Firestore integers are signed 64-bit; larger values become doubles
                json!({ "doubleValue": u as f64 })
            } else {
                json!({ "doubleValue": n.as_f64().unwrap_or_default() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(encode).collect::<Vec<_>>() }
        }),
        Value::Object(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

/// Encode a field map
pub fn encode_fields(fields: &Fields) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), encode_field(k, v)))
            .collect::<Map<_, _>>(),
    )
}

fn encode_field(name: &str, value: &Value) -> Value {
    if TIMESTAMP_FIELDS.contains(&name)
        && let Value::String(s) = value
        && let Ok(ts) = DateTime::parse_from_rfc3339(s)
    {
        return json!({
            "timestampValue": ts.to_utc().to_rfc3339_opts(SecondsFormat::AutoSi, true)
        });
    }
    encode(value)
}

/// Decode a Firestore value into plain JSON. Unknown shapes decode to null.
pub fn decode(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = obj.iter().next() else {
        return Value::Null;
    };
    match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => Value::Bool(inner.as_bool().unwrap_or_default()),
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(|i| Value::Number(i.into()))
                .unwrap_or(Value::Null),
            Value::Number(n) => Value::Number(n.clone()),
            _ => Value::Null,
        },
        "doubleValue" => match inner {
            Value::Number(n) => Value::Number(n.clone()),
            // NaN / Infinity arrive as strings and have no JSON form
            Value::String(s) => s
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            _ => Value::Null,
        },
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "geoPointValue" => inner.clone(),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .map(decode_fields)
                .unwrap_or_default(),
        ),
        _ => Value::Null,
    }
}

/// Decode the `fields` object of a Firestore document
pub fn decode_fields(fields: &Value) -> Fields {
    fields
        .as_object()
        .map(|obj| obj.iter().map(|(k, v)| (k.clone(), decode(v))).collect())
        .unwrap_or_default()
}
