// abana-client/tests/memory_backend.rs
// Backend behaviour through the trait objects the storefront uses

use std::sync::Arc;

use abana_client::{
    AuthService, ClientError, Direction, DocumentStore, DocumentWrite, MemoryBackend, Query,
};
use serde_json::json;
use shared::models::{Message, collections};

#[tokio::test]
async fn test_add_with_server_timestamp_orders_newest_first() {
    let backend = Arc::new(MemoryBackend::new());
    let store: Arc<dyn DocumentStore> = backend.clone();

    let mut ids = Vec::new();
    for name in ["first", "second", "third"] {
        let write = DocumentWrite::from_record(&Message::contact(name, "a@b.test", "hello"))
            .unwrap()
            .with_server_timestamp("createdAt");
        ids.push(store.add_document(collections::MESSAGES, write).await.unwrap());
    }

    let newest = store
        .query_collection(
            collections::MESSAGES,
            Query::all().order_by("createdAt", Direction::Descending).limit(2),
        )
        .await
        .unwrap();
    assert_eq!(newest.len(), 2);
    assert_eq!(newest[0].id, ids[2]);
    assert_eq!(newest[1].id, ids[1]);

    let decoded: Message = newest[0].decode().unwrap();
    assert_eq!(decoded.name, "third");
    assert!(!decoded.read);
    assert!(decoded.created_at.is_some());
}

#[tokio::test]
async fn test_missing_document_is_none() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryBackend::new());
    assert!(store.get_document("settings", "config").await.unwrap().is_none());
    // Deleting an absent document is not an error
    store.delete_document("menuItems", "ghost").await.unwrap();
}

#[tokio::test]
async fn test_offline_reads_fail() {
    let backend = MemoryBackend::new();
    backend.seed("settings", "config", json!({ "heroTitle": "Welcome" }));
    backend.set_offline(true);

    let err = backend.get_document("settings", "config").await.unwrap_err();
    assert!(matches!(err, ClientError::Unavailable(_)));

    backend.recover();
    assert!(backend.get_document("settings", "config").await.unwrap().is_some());
}

#[tokio::test]
async fn test_session_stream_follows_sign_in_and_out() {
    let backend = MemoryBackend::new().with_account("owner@abana.test", "pw");
    let auth: &dyn AuthService = &backend;
    let mut rx = auth.subscribe();
    assert!(rx.borrow().is_none());

    auth.sign_in("owner@abana.test", "pw").await.unwrap();
    rx.changed().await.unwrap();
    assert_eq!(
        rx.borrow().as_ref().map(|s| s.email.clone()).as_deref(),
        Some("owner@abana.test")
    );

    auth.sign_out().await.unwrap();
    rx.changed().await.unwrap();
    assert!(rx.borrow().is_none());
}
