//! Display models for storefront content
//!
//! Everything here is plain data a page template can print directly.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{CatalogItem, DEFAULT_CATEGORY, SiteSettings, Testimonial, non_blank};

use crate::money::format_grouped;

/// Image used for menu items without one
pub const PLACEHOLDER_IMAGE_URL: &str = "https://images.unsplash.com/photo-1567095761054-7a02e69e5c43?ixlib=rb-4.0.3&auto=format&fit=crop&w=687&q=80";

/// Pre-filled chat text for the WhatsApp button
const WHATSAPP_GREETING: &str =
    "Hi%20Abana%20Cafe!%20I%20saw%20your%20website%20and%20would%20like%20to%20know%20more.";

/// Price text for items whose stored price cannot be read
pub const PRICE_UNAVAILABLE: &str = "Price unavailable";

const STAR: char = '★';

/// Header, hero, about and contact blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteView {
    /// Header, footer and footer brand
    pub business_name: String,
    pub hero_title: String,
    pub hero_tagline: String,
    /// About text split on newlines
    pub about_paragraphs: Vec<String>,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub business_hours: String,
    /// Hidden when no number is configured
    pub whatsapp_link: Option<String>,
    /// Enables the pay button
    pub payment_link: Option<String>,
}

impl Default for SiteView {
    fn default() -> Self {
        Self {
            business_name: "Abana Cafe".to_string(),
            hero_title: "Welcome to Abana Cafe".to_string(),
            hero_tagline: "Fresh coffee, good food and great company".to_string(),
            about_paragraphs: vec![
                "Abana Cafe serves freshly brewed coffee and home-style meals.".to_string(),
            ],
            address: String::new(),
            phone_number: String::new(),
            email: String::new(),
            business_hours: String::new(),
            whatsapp_link: None,
            payment_link: None,
        }
    }
}

impl SiteView {
    /// Defaults overlaid with every non-blank settings field
    pub fn from_settings(settings: &SiteSettings) -> Self {
        let mut view = Self::default();
        view.apply(settings);
        view
    }

    pub fn apply(&mut self, settings: &SiteSettings) {
        let set = |target: &mut String, value: &Option<String>| {
            if let Some(v) = non_blank(value) {
                *target = v.to_string();
            }
        };
        set(&mut self.business_name, &settings.business_name);
        set(&mut self.hero_title, &settings.hero_title);
        set(&mut self.hero_tagline, &settings.hero_tagline);
        set(&mut self.address, &settings.address);
        set(&mut self.phone_number, &settings.phone_number);
        set(&mut self.email, &settings.email);
        set(&mut self.business_hours, &settings.business_hours);

        if let Some(about) = non_blank(&settings.about_text) {
            self.about_paragraphs = about
                .split('\n')
                .map(|p| p.trim_end_matches('\r').to_string())
                .collect();
        }
        if let Some(number) = non_blank(&settings.whatsapp_number) {
            self.whatsapp_link = Some(whatsapp_link(number));
        }
        if let Some(link) = non_blank(&settings.payment_link) {
            self.payment_link = Some(link.to_string());
        }
    }
}

pub fn whatsapp_link(number: &str) -> String {
    format!("https://wa.me/{}?text={}", number, WHATSAPP_GREETING)
}

/// One menu card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuCard {
    pub id: String,
    pub name: String,
    pub description: String,
    /// `₦1,500`, or [`PRICE_UNAVAILABLE`]
    pub price_label: String,
    /// Present only when the item can be added to the cart
    pub price: Option<Decimal>,
    pub category: String,
    pub image_url: String,
}

impl MenuCard {
    pub fn from_item(id: impl Into<String>, item: &CatalogItem, currency_symbol: &str) -> Self {
        let price = item.sellable_price();
        Self {
            id: id.into(),
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            price_label: price
                .map(|p| format_grouped(currency_symbol, p))
                .unwrap_or_else(|| PRICE_UNAVAILABLE.to_string()),
            price,
            category: item.category_or_default().to_string(),
            image_url: non_blank(&item.image_url)
                .unwrap_or(PLACEHOLDER_IMAGE_URL)
                .to_string(),
        }
    }

    pub fn can_add_to_cart(&self) -> bool {
        self.price.is_some()
    }
}

/// Menu block state after a load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "cards", rename_all = "snake_case")]
pub enum MenuSection {
    Items(Vec<MenuCard>),
    /// Collection exists but is empty
    ComingSoon,
    /// Fetch failed
    Unavailable,
}

impl MenuSection {
    pub fn cards(&self) -> &[MenuCard] {
        match self {
            Self::Items(cards) => cards,
            _ => &[],
        }
    }

    /// Cards in `category`; `all` matches every card
    pub fn filter(&self, category: &str) -> Vec<&MenuCard> {
        self.cards()
            .iter()
            .filter(|c| category == DEFAULT_CATEGORY || c.category == category)
            .collect()
    }

    /// Title and body of the placeholder card, when there are no items
    pub fn placeholder(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Items(_) => None,
            Self::ComingSoon => Some((
                "Menu Coming Soon",
                "Check back later for our delicious offerings!",
            )),
            Self::Unavailable => Some(("Error Loading Menu", "Please try again later")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestimonialCard {
    /// `★` per rating point
    pub stars: String,
    pub text: String,
    pub author: String,
}

impl From<&Testimonial> for TestimonialCard {
    fn from(t: &Testimonial) -> Self {
        Self {
            stars: std::iter::repeat_n(STAR, usize::from(t.stars())).collect(),
            text: t.text.clone(),
            author: t.author.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "cards", rename_all = "snake_case")]
pub enum TestimonialSection {
    Cards(Vec<TestimonialCard>),
    /// Keep the testimonials built into the page
    Static,
}

/// Everything a storefront page load produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorefrontContent {
    pub site: SiteView,
    pub menu: MenuSection,
    pub testimonials: TestimonialSection,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn item(price: Option<&str>, category: Option<&str>) -> CatalogItem {
        CatalogItem {
            name: "Latte".into(),
            price: price.map(|p| Decimal::from_str(p).unwrap()),
            category: category.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_settings_keep_defaults() {
        let settings = SiteSettings {
            business_name: Some("   ".into()),
            hero_title: Some("Fresh daily".into()),
            ..Default::default()
        };
        let view = SiteView::from_settings(&settings);
        assert_eq!(view.business_name, SiteView::default().business_name);
        assert_eq!(view.hero_title, "Fresh daily");
        assert!(view.whatsapp_link.is_none());
    }

    #[test]
    fn test_about_split_and_links() {
        let settings = SiteSettings {
            about_text: Some("First.\nSecond.".into()),
            whatsapp_number: Some("2348012345678".into()),
            payment_link: Some("https://paystack.com/pay/abana".into()),
            ..Default::default()
        };
        let view = SiteView::from_settings(&settings);
        assert_eq!(view.about_paragraphs, vec!["First.", "Second."]);
        assert_eq!(
            view.whatsapp_link.as_deref(),
            Some(
                "https://wa.me/2348012345678?text=Hi%20Abana%20Cafe!%20I%20saw%20your%20website%20and%20would%20like%20to%20know%20more."
            )
        );
        assert_eq!(view.payment_link.as_deref(), Some("https://paystack.com/pay/abana"));
    }

    #[test]
    fn test_menu_card_defaults() {
        let card = MenuCard::from_item("m1", &item(Some("1500"), None), "₦");
        assert_eq!(card.price_label, "₦1,500");
        assert_eq!(card.category, "all");
        assert_eq!(card.image_url, PLACEHOLDER_IMAGE_URL);
        assert_eq!(card.description, "");
        assert!(card.can_add_to_cart());
    }

    #[test]
    fn test_unreadable_price_card() {
        let card = MenuCard::from_item("m1", &item(None, None), "₦");
        assert_eq!(card.price_label, PRICE_UNAVAILABLE);
        assert!(!card.can_add_to_cart());

        let negative = MenuCard::from_item("m2", &item(Some("-5"), None), "₦");
        assert!(!negative.can_add_to_cart());
    }

    #[test]
    fn test_menu_filter() {
        let section = MenuSection::Items(vec![
            MenuCard::from_item("a", &item(Some("1"), Some("milk")), "₦"),
            MenuCard::from_item("b", &item(Some("2"), Some("coffee")), "₦"),
        ]);
        assert_eq!(section.filter("all").len(), 2);
        let milk = section.filter("milk");
        assert_eq!(milk.len(), 1);
        assert_eq!(milk[0].id, "a");
        assert!(section.filter("tea").is_empty());
        assert!(MenuSection::ComingSoon.filter("all").is_empty());
    }

    #[test]
    fn test_testimonial_stars() {
        let mut t = Testimonial {
            text: "Lovely".into(),
            author: "Ngozi".into(),
            rating: None,
        };
        assert_eq!(TestimonialCard::from(&t).stars, "★★★★★");
        t.rating = Some(3);
        assert_eq!(TestimonialCard::from(&t).stars, "★★★");
        t.rating = Some(9);
        assert_eq!(TestimonialCard::from(&t).stars.chars().count(), 5);
    }
}
