//! Signed-in session state shared by backends

use chrono::{DateTime, Utc};
use tokio::sync::watch;

/// A signed-in admin session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Provider user id
    pub uid: String,
    pub email: String,
    /// Bearer token for document requests
    pub id_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

/// Holder of the current session that fans out every change to subscribers
///
/// Subscribers see the latest value only; intermediate changes may be
/// coalesced.
#[derive(Debug)]
pub struct SessionHub {
    tx: watch::Sender<Option<Session>>,
}

impl SessionHub {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    /// Replace the session, notifying subscribers
    pub fn set(&self, session: Session) {
        self.tx.send_replace(Some(session));
    }

    /// Drop the session, notifying subscribers
    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    /// Bearer token of the current session, if any
    pub fn token(&self) -> Option<String> {
        self.tx.borrow().as_ref().map(|s| s.id_token.clone())
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}

impl Default for SessionHub {
    fn default() -> Self {
        Self::new()
    }
}
