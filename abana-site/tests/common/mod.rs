// Shared fixtures for abana-site integration tests
#![allow(dead_code)]

use std::sync::Arc;

use abana_client::MemoryBackend;
use abana_site::{Config, Notification, SiteState};
use tokio::sync::broadcast;

pub const ADMIN_EMAIL: &str = "owner@abana.test";
pub const ADMIN_PASSWORD: &str = "correct horse";

pub fn config() -> Config {
    let mut config = Config::with_work_dir(std::env::temp_dir().join("abana-site-tests"));
    config.currency_symbol = "₦".to_string();
    config.testimonial_limit = 3;
    config.message_limit = 50;
    config.default_menu_category = "milk".to_string();
    config
}

pub fn backend() -> Arc<MemoryBackend> {
    Arc::new(MemoryBackend::new().with_account(ADMIN_EMAIL, ADMIN_PASSWORD))
}

pub fn state(backend: &Arc<MemoryBackend>) -> SiteState {
    SiteState::in_memory(config(), backend.clone())
}

/// Everything published so far
pub fn drain(rx: &mut broadcast::Receiver<Notification>) -> Vec<Notification> {
    let mut out = Vec::new();
    while let Ok(n) = rx.try_recv() {
        out.push(n);
    }
    out
}
