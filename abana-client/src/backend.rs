//! Backend capability traits
//!
//! The whole storefront reaches the managed services through these two
//! traits, so a test can swap in [`crate::MemoryBackend`] and the binary can
//! use [`crate::FirebaseBackend`].

use async_trait::async_trait;
use tokio::sync::watch;

use crate::document::{Document, DocumentWrite, Query};
use crate::error::ClientResult;
use crate::session::Session;

/// Document database capability
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document; `Ok(None)` when it does not exist
    async fn get_document(&self, collection: &str, id: &str) -> ClientResult<Option<Document>>;

    /// Write a document under a known id. With `merge`, fields not present
    /// in `write` are left untouched; without it the document is replaced.
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        write: DocumentWrite,
        merge: bool,
    ) -> ClientResult<()>;

    /// Create a document under a generated id and return that id
    async fn add_document(&self, collection: &str, write: DocumentWrite) -> ClientResult<String>;

    async fn delete_document(&self, collection: &str, id: &str) -> ClientResult<()>;

    /// Documents of a collection. Ordering on a field skips documents that
    /// lack it.
    async fn query_collection(&self, collection: &str, query: Query)
    -> ClientResult<Vec<Document>>;

    /// Number of documents in a collection
    async fn count_collection(&self, collection: &str) -> ClientResult<usize> {
        Ok(self.query_collection(collection, Query::all()).await?.len())
    }
}

/// Authentication capability
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Email/password sign-in; on success the session is published to
    /// subscribers
    async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Session>;

    async fn sign_out(&self) -> ClientResult<()>;

    fn current_session(&self) -> Option<Session>;

    /// Session changes (`None` = signed out). The receiver starts with the
    /// current state.
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;
}
