//! User-visible notifications
//!
//! Every outcome a visitor or admin should see (validation failures, backend
//! errors, confirmations) is published on a [`NotificationBus`]. The page
//! layer subscribes and shows them as toasts; nothing here blocks on a
//! subscriber existing.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default channel capacity
const DEFAULT_CAPACITY: usize = 64;

/// Toast styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}

/// Broadcast channel of [`Notification`]s
#[derive(Debug, Clone)]
pub struct NotificationBus {
    tx: broadcast::Sender<Notification>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish to current subscribers; dropped when there are none
    pub fn publish(&self, notification: Notification) {
        tracing::debug!(level = ?notification.level, message = %notification.message, "notify");
        let _ = self.tx.send(notification);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(Notification::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(Notification::error(message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.publish(Notification::info(message));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers() {
        let bus = NotificationBus::new();
        bus.success("nobody listening");
    }

    #[tokio::test]
    async fn test_subscribers_receive_in_order() {
        let bus = NotificationBus::new();
        let mut rx = bus.subscribe();

        bus.error("Your cart is empty");
        bus.info("Please click the Paystack button to complete payment");

        assert_eq!(rx.recv().await.unwrap(), Notification::error("Your cart is empty"));
        assert_eq!(rx.recv().await.unwrap().level, NotificationLevel::Info);
    }

    #[test]
    fn test_level_serializes_lowercase() {
        let json = serde_json::to_string(&Notification::success("ok")).unwrap();
        assert_eq!(json, r#"{"level":"success","message":"ok"}"#);
    }
}
