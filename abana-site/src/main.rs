use std::sync::Arc;

use abana_client::MemoryBackend;
use abana_site::{SiteState, print_banner, setup_environment};

/// Runs one storefront page load against the configured backend and prints
/// what the page would show.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, work dir, logging)
    let config = setup_environment()?;
    print_banner();

    // 2. State: real backend when credentials exist, otherwise in-process
    let state = if config.has_backend_credentials() {
        SiteState::initialize(&config)?
    } else {
        tracing::warn!("FIREBASE_API_KEY not set, using the in-memory backend");
        SiteState::in_memory(config.clone(), Arc::new(MemoryBackend::new()))
    };
    let mut notifications = state.notifications.subscribe();

    // 3. Page load
    let cart = state.restore_cart();
    let content = state.content_sync().run().await;

    println!("{}", serde_json::to_string_pretty(&content)?);
    println!(
        "{}",
        serde_json::to_string_pretty(&cart.view(&state.config.currency_symbol))?
    );

    while let Ok(notification) = notifications.try_recv() {
        tracing::info!(level = ?notification.level, "{}", notification.message);
    }

    Ok(())
}
