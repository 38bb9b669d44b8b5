//! Site Settings Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::{lenient_text, lenient_timestamp};

/// Site-wide editable text and contact fields (singleton `settings/config`)
///
/// Every field is optional: a missing, blank or wrongly typed field keeps
/// the storefront's compiled-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(default, deserialize_with = "lenient_text")]
    pub business_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub hero_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub hero_tagline: Option<String>,
    /// Free text, paragraphs separated by newlines
    #[serde(default, deserialize_with = "lenient_text")]
    pub about_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub business_hours: Option<String>,
    /// International number without `+`, used for the wa.me launch link
    #[serde(default, deserialize_with = "lenient_text")]
    pub whatsapp_number: Option<String>,
    /// Hosted payment page opened at checkout
    #[serde(default, deserialize_with = "lenient_text")]
    pub payment_link: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SiteSettings {
    /// Payment link, if set and not blank
    pub fn payment_link(&self) -> Option<&str> {
        non_blank(&self.payment_link)
    }
}

/// Settings form payload written with a merge
///
/// Only the fields present here are written; anything else already stored
/// in the record is left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsUpdate {
    pub business_name: String,
    pub hero_title: String,
    pub hero_tagline: String,
    pub about_text: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub whatsapp_number: String,
    pub payment_link: String,
    /// Client clock at save time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&SiteSettings> for SiteSettingsUpdate {
    fn from(settings: &SiteSettings) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            business_name: text(&settings.business_name),
            hero_title: text(&settings.hero_title),
            hero_tagline: text(&settings.hero_tagline),
            about_text: text(&settings.about_text),
            phone_number: text(&settings.phone_number),
            email: text(&settings.email),
            address: text(&settings.address),
            whatsapp_number: text(&settings.whatsapp_number),
            payment_link: text(&settings.payment_link),
            updated_at: None,
        }
    }
}

/// Trimmed value of an optional text field, `None` when blank
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_record() {
        let json = r#"{"businessName":"Abana Cafe","heroTitle":"Fresh daily"}"#;
        let settings: SiteSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.business_name.as_deref(), Some("Abana Cafe"));
        assert_eq!(settings.hero_title.as_deref(), Some("Fresh daily"));
        assert!(settings.payment_link.is_none());
        assert!(settings.updated_at.is_none());
    }

    #[test]
    fn test_wrongly_typed_field_keeps_the_rest() {
        let json = r#"{"businessName":"Abana Lekki","phoneNumber":2348000000000,
                       "heroTitle":["x"],"updatedAt":12}"#;
        let settings: SiteSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.business_name.as_deref(), Some("Abana Lekki"));
        assert_eq!(settings.phone_number.as_deref(), Some("2348000000000"));
        assert!(settings.hero_title.is_none());
        assert!(settings.updated_at.is_none());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(&Some("  x ".into())), Some("x"));
        assert_eq!(non_blank(&Some("   ".into())), None);
        assert_eq!(non_blank(&None), None);
    }

    #[test]
    fn test_update_from_settings_fills_blanks() {
        let settings = SiteSettings {
            business_name: Some("Abana".into()),
            ..Default::default()
        };
        let update = SiteSettingsUpdate::from(&settings);
        assert_eq!(update.business_name, "Abana");
        assert_eq!(update.hero_title, "");
    }

    #[test]
    fn test_update_serializes_camel_case() {
        let update = SiteSettingsUpdate {
            whatsapp_number: "2348000000000".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["whatsappNumber"], "2348000000000");
        assert!(value.get("businessName").is_some());
    }
}
