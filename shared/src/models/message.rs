//! Message Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::util::{lenient_bool, lenient_string, lenient_text, lenient_timestamp};

/// Message type discriminator
///
/// Types written by other tools are kept verbatim so they still show up as
/// a badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageKind {
    /// Sent from the contact form
    Contact,
    /// Companion summary of a placed order
    Order,
    Other(String),
}

impl MessageKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Contact => "contact",
            Self::Order => "order",
            Self::Other(kind) => kind,
        }
    }
}

impl From<String> for MessageKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "contact" => Self::Contact,
            "order" => Self::Order,
            _ => Self::Other(kind),
        }
    }
}

impl From<MessageKind> for String {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

fn lenient_kind<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<MessageKind>, D::Error> {
    Ok(lenient_text(deserializer)?
        .filter(|k| !k.trim().is_empty())
        .map(MessageKind::from))
}

/// Message record (`messages` collection)
///
/// Older contact messages were written without `type`, so it is optional on
/// read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient_kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<MessageKind>,
    /// Starts false; nothing marks messages read yet
    #[serde(default, deserialize_with = "lenient_bool")]
    pub read: bool,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Unread contact message
    pub fn contact(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            message: message.into(),
            kind: Some(MessageKind::Contact),
            read: false,
            created_at: None,
        }
    }

    /// Unread order summary so new orders show up in the admin message list
    pub fn order_summary(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: Some(phone.into()),
            message: body.into(),
            kind: Some(MessageKind::Order),
            read: false,
            created_at: None,
        }
    }
}
