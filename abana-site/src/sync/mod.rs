//! Content sync
//!
//! Pulls the settings record, the menu and a few testimonials from the
//! document store and projects them into display models. The storefront
//! runs the whole sequence at page load; the admin console reuses the
//! individual loaders.
//!
//! ```text
//! run()
//!  ├─ load_settings()      settings/config     → SiteView
//!  ├─ load_menu()          menuItems           → MenuSection
//!  └─ load_testimonials()  testimonials (limit) → TestimonialSection
//! ```
//!
//! Sections fail independently. Only a settings failure is surfaced to the
//! visitor; the menu shows its own error card and testimonials fall back to
//! the static ones.

pub mod view;

use std::sync::Arc;

use abana_client::{Document, DocumentStore, Query};
use shared::models::{CatalogItem, SETTINGS_DOC_ID, SiteSettings, Testimonial, collections};

use crate::core::config::DEFAULT_TESTIMONIAL_LIMIT;
use crate::money::DEFAULT_CURRENCY_SYMBOL;
use crate::notify::NotificationBus;
use crate::utils::AppResult;

pub use view::{
    MenuCard, MenuSection, PLACEHOLDER_IMAGE_URL, PRICE_UNAVAILABLE, SiteView, StorefrontContent,
    TestimonialCard, TestimonialSection,
};

/// Shown when the settings record cannot be fetched
pub const CONTENT_LOAD_ERROR: &str = "Error loading content. Please refresh.";

#[derive(Clone)]
pub struct ContentSync {
    store: Arc<dyn DocumentStore>,
    notifications: NotificationBus,
    currency_symbol: String,
    testimonial_limit: usize,
}

impl std::fmt::Debug for ContentSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentSync")
            .field("currency_symbol", &self.currency_symbol)
            .field("testimonial_limit", &self.testimonial_limit)
            .finish_non_exhaustive()
    }
}

impl ContentSync {
    pub fn new(store: Arc<dyn DocumentStore>, notifications: NotificationBus) -> Self {
        Self {
            store,
            notifications,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            testimonial_limit: DEFAULT_TESTIMONIAL_LIMIT,
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn with_testimonial_limit(mut self, limit: usize) -> Self {
        self.testimonial_limit = limit;
        self
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// The singleton settings record; `None` when it was never saved
    pub async fn load_settings(&self) -> AppResult<Option<SiteSettings>> {
        let doc = self
            .store
            .get_document(collections::SETTINGS, SETTINGS_DOC_ID)
            .await?;
        match doc {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => {
                tracing::info!("No settings record, using defaults");
                Ok(None)
            }
        }
    }

    /// Catalog items with their document ids, in backend order
    ///
    /// Documents that cannot be read as items are skipped.
    pub async fn fetch_catalog(&self) -> AppResult<Vec<(String, CatalogItem)>> {
        let docs = self
            .store
            .query_collection(collections::MENU_ITEMS, Query::all())
            .await?;
        Ok(docs.into_iter().filter_map(decode_logged).collect())
    }

    pub async fn load_menu(&self) -> MenuSection {
        match self.fetch_catalog().await {
            Ok(items) if items.is_empty() => MenuSection::ComingSoon,
            Ok(items) => MenuSection::Items(
                items
                    .iter()
                    .map(|(id, item)| MenuCard::from_item(id, item, &self.currency_symbol))
                    .collect(),
            ),
            Err(e) => {
                tracing::error!(error = %e, "Error loading menu items");
                MenuSection::Unavailable
            }
        }
    }

    pub async fn load_testimonials(&self) -> TestimonialSection {
        let query = Query::all().limit(self.testimonial_limit);
        match self
            .store
            .query_collection(collections::TESTIMONIALS, query)
            .await
        {
            Ok(docs) => {
                let cards: Vec<TestimonialCard> = docs
                    .into_iter()
                    .filter_map(decode_logged::<Testimonial>)
                    .map(|(_, t)| TestimonialCard::from(&t))
                    .collect();
                if cards.is_empty() {
                    TestimonialSection::Static
                } else {
                    TestimonialSection::Cards(cards)
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading testimonials");
                TestimonialSection::Static
            }
        }
    }

    /// Full page load
    pub async fn run(&self) -> StorefrontContent {
        tracing::info!("Loading storefront content");
        let site = match self.load_settings().await {
            Ok(Some(settings)) => SiteView::from_settings(&settings),
            Ok(None) => SiteView::default(),
            Err(e) => {
                tracing::error!(error = %e, "Error loading settings");
                self.notifications.error(CONTENT_LOAD_ERROR);
                SiteView::default()
            }
        };
        let menu = self.load_menu().await;
        let testimonials = self.load_testimonials().await;

        StorefrontContent {
            site,
            menu,
            testimonials,
        }
    }
}

fn decode_logged<T: serde::de::DeserializeOwned>(doc: Document) -> Option<(String, T)> {
    match doc.decode::<T>() {
        Ok(record) => Some((doc.id, record)),
        Err(e) => {
            tracing::warn!(id = %doc.id, error = %e, "Skipping unreadable document");
            None
        }
    }
}
