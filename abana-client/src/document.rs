//! Documents, writes and queries exchanged with the store

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ClientError, ClientResult};

/// Field map of a document
pub type Fields = Map<String, Value>;

/// A stored document: generated or chosen id plus its fields
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Deserialize the fields into a record type
    pub fn decode<T: DeserializeOwned>(&self) -> ClientResult<T> {
        Ok(serde_json::from_value(Value::Object(self.fields.clone()))?)
    }

    /// Raw field lookup
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

/// Fields to write, plus the fields the backend must stamp with its own
/// clock at commit time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentWrite {
    pub fields: Fields,
    pub server_timestamp_fields: Vec<String>,
}

impl DocumentWrite {
    pub fn new(fields: Fields) -> Self {
        Self {
            fields,
            server_timestamp_fields: Vec::new(),
        }
    }

    /// Serialize a record into a write. The record must serialize to an object.
    pub fn from_record<T: Serialize>(record: &T) -> ClientResult<Self> {
        match serde_json::to_value(record)? {
            Value::Object(fields) => Ok(Self::new(fields)),
            other => Err(ClientError::InvalidResponse(format!(
                "record must serialize to an object, got {}",
                other
            ))),
        }
    }

    /// Ask the backend to set `field` to its commit time
    pub fn with_server_timestamp(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        self.fields.remove(&field);
        self.server_timestamp_fields.push(field);
        self
    }

    /// Names of every field this write touches
    pub fn field_paths(&self) -> Vec<String> {
        self.fields
            .keys()
            .cloned()
            .chain(self.server_timestamp_fields.iter().cloned())
            .collect()
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// Ordering clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Collection query: optional ordering and a fetch limit, nothing else
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl Query {
    /// Every document, backend order
    pub fn all() -> Self {
        Self::default()
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
