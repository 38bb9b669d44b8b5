// abana-site/tests/storefront.rs
// Page load: settings, menu, testimonials

mod common;

use abana_site::sync::{CONTENT_LOAD_ERROR, SiteView, TestimonialSection};
use abana_site::{MenuSection, Notification};
use serde_json::json;

#[tokio::test]
async fn test_missing_settings_keep_defaults_silently() {
    let backend = common::backend();
    let state = common::state(&backend);
    let mut rx = state.notifications.subscribe();

    let content = state.content_sync().run().await;

    assert_eq!(content.site, SiteView::default());
    assert_eq!(content.menu, MenuSection::ComingSoon);
    assert_eq!(content.testimonials, TestimonialSection::Static);
    assert!(common::drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_settings_projected() {
    let backend = common::backend();
    backend.seed(
        "settings",
        "config",
        json!({
            "businessName": "Abana Cafe Lekki",
            "aboutText": "Since 2019.\nFamily run.",
            "whatsappNumber": "2348000000000",
            "businessHours": "Mon-Sat 8am-9pm",
            "heroTitle": ""
        }),
    );
    let state = common::state(&backend);

    let content = state.content_sync().run().await;
    assert_eq!(content.site.business_name, "Abana Cafe Lekki");
    assert_eq!(content.site.about_paragraphs.len(), 2);
    assert_eq!(content.site.business_hours, "Mon-Sat 8am-9pm");
    assert_eq!(content.site.hero_title, SiteView::default().hero_title);
    assert!(
        content
            .site
            .whatsapp_link
            .as_deref()
            .unwrap()
            .starts_with("https://wa.me/2348000000000?text=Hi%20Abana%20Cafe!")
    );
}

#[tokio::test]
async fn test_settings_failure_notifies_once_and_menu_still_loads() {
    let backend = common::backend();
    backend.seed("menuItems", "m1", json!({ "name": "Latte", "price": 1500 }));
    backend.fail_reads("settings");
    let state = common::state(&backend);
    let mut rx = state.notifications.subscribe();

    let content = state.content_sync().run().await;

    assert_eq!(
        common::drain(&mut rx),
        vec![Notification::error(CONTENT_LOAD_ERROR)]
    );
    assert_eq!(content.site, SiteView::default());
    assert_eq!(content.menu.cards().len(), 1);
}

#[tokio::test]
async fn test_menu_cards() {
    let backend = common::backend();
    backend.seed(
        "menuItems",
        "m1",
        json!({ "name": "Latte", "price": 1500, "category": "coffee", "description": "Smooth" }),
    );
    backend.seed("menuItems", "m2", json!({ "name": "Zobo", "price": "700" }));
    backend.seed("menuItems", "m3", json!({ "name": "Mystery", "price": "ask us" }));
    let state = common::state(&backend);

    let menu = state.content_sync().load_menu().await;
    let cards = menu.cards();
    assert_eq!(cards.len(), 3);

    assert_eq!(cards[0].price_label, "₦1,500");
    assert_eq!(cards[0].category, "coffee");
    assert_eq!(cards[1].price_label, "₦700");
    assert_eq!(cards[1].category, "all");
    assert_eq!(cards[2].price_label, "Price unavailable");
    assert!(!cards[2].can_add_to_cart());

    assert_eq!(menu.filter("coffee").len(), 1);
    assert_eq!(menu.filter("all").len(), 3);
}

#[tokio::test]
async fn test_menu_fetch_failure() {
    let backend = common::backend();
    backend.fail_reads("menuItems");
    let state = common::state(&backend);
    let mut rx = state.notifications.subscribe();

    let content = state.content_sync().run().await;
    assert_eq!(content.menu, MenuSection::Unavailable);
    assert_eq!(
        content.menu.placeholder(),
        Some(("Error Loading Menu", "Please try again later"))
    );
    // Only settings failures reach the visitor
    assert!(common::drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_testimonials_limited() {
    let backend = common::backend();
    for i in 0..5 {
        backend.seed(
            "testimonials",
            &format!("t{}", i),
            json!({ "text": format!("Great #{}", i), "author": "Guest", "rating": i }),
        );
    }
    let state = common::state(&backend);

    match state.content_sync().load_testimonials().await {
        TestimonialSection::Cards(cards) => {
            assert_eq!(cards.len(), 3);
            // rating 0 renders as five stars
            assert_eq!(cards[0].stars, "★★★★★");
            assert_eq!(cards[2].stars, "★★");
        }
        other => panic!("expected cards, got {:?}", other),
    }
}

#[tokio::test]
async fn test_testimonial_failure_keeps_static() {
    let backend = common::backend();
    backend.fail_reads("testimonials");
    let state = common::state(&backend);
    assert_eq!(
        state.content_sync().load_testimonials().await,
        TestimonialSection::Static
    );
}

#[tokio::test]
async fn test_wrongly_typed_setting_keeps_the_record() {
    let backend = common::backend();
    backend.seed(
        "settings",
        "config",
        json!({ "businessName": "Abana Lekki", "phoneNumber": 2348000000000u64, "aboutText": false }),
    );
    let state = common::state(&backend);
    let mut rx = state.notifications.subscribe();

    let content = state.content_sync().run().await;
    assert_eq!(content.site.business_name, "Abana Lekki");
    assert_eq!(content.site.phone_number, "2348000000000");
    assert_eq!(
        content.site.about_paragraphs,
        SiteView::default().about_paragraphs
    );
    assert!(common::drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_oversized_price_is_not_sellable() {
    let backend = common::backend();
    backend.seed(
        "menuItems",
        "gold",
        json!({ "name": "Gold Latte", "price": 1e28 }),
    );
    let state = common::state(&backend);

    let menu = state.content_sync().load_menu().await;
    let card = &menu.cards()[0];
    assert_eq!(card.price_label, "Price unavailable");
    assert!(!card.can_add_to_cart());
}

#[tokio::test]
async fn test_fractional_rating_still_shown() {
    let backend = common::backend();
    backend.seed(
        "testimonials",
        "t1",
        json!({ "text": "Lovely", "author": "Bo", "rating": 4.5 }),
    );
    let state = common::state(&backend);

    match state.content_sync().load_testimonials().await {
        TestimonialSection::Cards(cards) => assert_eq!(cards[0].stars, "★★★★"),
        other => panic!("expected cards, got {:?}", other),
    }
}
