//! In-process backend
//!
//! Behaves like the managed services for everything the storefront relies on:
//! generated ids, merge writes, server timestamps, ordered/limited queries and
//! email/password sign-in. Failures can be injected per collection or for the
//! whole backend.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::watch;

use crate::backend::{AuthService, DocumentStore};
use crate::document::{Direction, Document, DocumentWrite, Fields, Query};
use crate::error::{AuthError, ClientError, ClientResult};
use crate::session::{Session, SessionHub};

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    password: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    /// Documents per collection in insertion order
    collections: HashMap<String, Vec<Document>>,
    accounts: HashMap<String, Account>,
    failing_reads: HashSet<String>,
    failing_writes: HashSet<String>,
    offline: bool,
    last_timestamp: Option<DateTime<Utc>>,
}

impl MemoryState {
    fn check_read(&self, collection: &str) -> ClientResult<()> {
        if self.offline {
            return Err(ClientError::Unavailable("backend offline".into()));
        }
        if self.failing_reads.contains(collection) {
            return Err(ClientError::Unavailable(format!(
                "reads from '{}' are failing",
                collection
            )));
        }
        Ok(())
    }

    fn check_write(&self, collection: &str) -> ClientResult<()> {
        if self.offline {
            return Err(ClientError::Unavailable("backend offline".into()));
        }
        if self.failing_writes.contains(collection) {
            return Err(ClientError::Forbidden(format!(
                "writes to '{}' are rejected",
                collection
            )));
        }
        Ok(())
    }

    /// Strictly increasing commit time, RFC 3339 with microseconds
    fn next_timestamp(&mut self) -> String {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp
            && now <= last
        {
            now = last + Duration::microseconds(1);
        }
        self.last_timestamp = Some(now);
        now.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn resolve(&mut self, write: DocumentWrite) -> Fields {
        let DocumentWrite {
            mut fields,
            server_timestamp_fields,
        } = write;
        if !server_timestamp_fields.is_empty() {
            let stamp = self.next_timestamp();
            for field in server_timestamp_fields {
                fields.insert(field, Value::String(stamp.clone()));
            }
        }
        fields
    }
}

/// Document store and auth service held in memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
    sessions: SessionHub,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an email/password account
    pub fn with_account(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        let uid = format!("uid-{}", short_id());
        self.state.lock().accounts.insert(
            email.into(),
            Account {
                uid,
                password: password.into(),
            },
        );
        self
    }

    /// Put a document in place without going through failure checks
    pub fn seed(&self, collection: &str, id: &str, record: Value) {
        let fields = match record {
            Value::Object(fields) => fields,
            _ => Fields::new(),
        };
        let mut state = self.state.lock();
        let docs = state.collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(doc) => doc.fields = fields,
            None => docs.push(Document::new(id, fields)),
        }
    }

    /// Snapshot of a collection in insertion order
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.state
            .lock()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn count(&self, collection: &str) -> usize {
        self.state
            .lock()
            .collections
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Make every read from `collection` fail
    pub fn fail_reads(&self, collection: &str) {
        self.state.lock().failing_reads.insert(collection.to_string());
    }

    /// Make every write to `collection` fail
    pub fn fail_writes(&self, collection: &str) {
        self.state
            .lock()
            .failing_writes
            .insert(collection.to_string());
    }

    /// Fail every call, reads and sign-in included
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().offline = offline;
    }

    /// Clear all injected failures
    pub fn recover(&self) {
        let mut state = self.state.lock();
        state.offline = false;
        state.failing_reads.clear();
        state.failing_writes.clear();
    }
}

fn short_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(20);
    id
}

/// Ordering between field values of one type; mixed types order by kind
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or_default(), y.as_f64().unwrap_or_default());
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[async_trait]
impl DocumentStore for MemoryBackend {
    async fn get_document(&self, collection: &str, id: &str) -> ClientResult<Option<Document>> {
        let state = self.state.lock();
        state.check_read(collection)?;
        Ok(state
            .collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        write: DocumentWrite,
        merge: bool,
    ) -> ClientResult<()> {
        let mut state = self.state.lock();
        state.check_write(collection)?;
        let fields = state.resolve(write);
        let docs = state.collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d.id == id) {
            Some(doc) if merge => doc.fields.extend(fields),
            Some(doc) => doc.fields = fields,
            None => docs.push(Document::new(id, fields)),
        }
        tracing::debug!(collection, id, merge, "memory: set document");
        Ok(())
    }

    async fn add_document(&self, collection: &str, write: DocumentWrite) -> ClientResult<String> {
        let mut state = self.state.lock();
        state.check_write(collection)?;
        let fields = state.resolve(write);
        let id = short_id();
        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(id.clone(), fields));
        tracing::debug!(collection, id = %id, "memory: add document");
        Ok(id)
    }

    async fn delete_document(&self, collection: &str, id: &str) -> ClientResult<()> {
        let mut state = self.state.lock();
        state.check_write(collection)?;
        if let Some(docs) = state.collections.get_mut(collection) {
            docs.retain(|d| d.id != id);
        }
        Ok(())
    }

    async fn query_collection(
        &self,
        collection: &str,
        query: Query,
    ) -> ClientResult<Vec<Document>> {
        let state = self.state.lock();
        state.check_read(collection)?;
        let mut docs = state
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default();
        drop(state);

        if let Some(order) = &query.order_by {
            docs.retain(|d| d.fields.contains_key(&order.field));
            docs.sort_by(|a, b| {
                let ord = compare_values(&a.fields[&order.field], &b.fields[&order.field]);
                match order.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }
        if let Some(limit) = query.limit {
            docs.truncate(limit);
        }
        Ok(docs)
    }

    async fn count_collection(&self, collection: &str) -> ClientResult<usize> {
        let state = self.state.lock();
        state.check_read(collection)?;
        Ok(state.collections.get(collection).map_or(0, Vec::len))
    }
}

#[async_trait]
impl AuthService for MemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Session> {
        let account = {
            let state = self.state.lock();
            if state.offline {
                return Err(ClientError::Unavailable("backend offline".into()));
            }
            state.accounts.get(email).cloned()
        };
        let account = match account {
            Some(a) if a.password == password => a,
            _ => return Err(AuthError::InvalidCredentials.into()),
        };
        let session = Session {
            uid: account.uid,
            email: email.to_string(),
            id_token: uuid::Uuid::new_v4().to_string(),
            refresh_token: None,
            expires_at: Some(Utc::now() + Duration::hours(1)),
        };
        self.sessions.set(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> ClientResult<()> {
        self.sessions.clear();
        Ok(())
    }

    fn current_session(&self) -> Option<Session> {
        self.sessions.current()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.sessions.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(value: Value) -> DocumentWrite {
        match value {
            Value::Object(fields) => DocumentWrite::new(fields),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_timestamps_strictly_increase() {
        let mut state = MemoryState::default();
        let a = state.next_timestamp();
        let b = state.next_timestamp();
        assert!(b > a, "{} should sort after {}", b, a);
    }

    #[test]
    fn test_compare_values() {
        assert_eq!(compare_values(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(compare_values(&json!("b"), &json!("a")), Ordering::Greater);
        assert_eq!(compare_values(&json!(1), &json!("1")), Ordering::Less);
    }

    #[tokio::test]
    async fn test_merge_keeps_untouched_fields() {
        let backend = MemoryBackend::new();
        backend.seed("settings", "config", json!({ "heroTitle": "Old", "phoneNumber": "0800" }));

        backend
            .set_document("settings", "config", write(json!({ "heroTitle": "New" })), true)
            .await
            .unwrap();
        let doc = backend.get_document("settings", "config").await.unwrap().unwrap();
        assert_eq!(doc.fields["heroTitle"], json!("New"));
        assert_eq!(doc.fields["phoneNumber"], json!("0800"));

        backend
            .set_document("settings", "config", write(json!({ "heroTitle": "Only" })), false)
            .await
            .unwrap();
        let doc = backend.get_document("settings", "config").await.unwrap().unwrap();
        assert!(doc.get("phoneNumber").is_none());
    }

    #[tokio::test]
    async fn test_query_order_skips_missing_field() {
        let backend = MemoryBackend::new();
        backend.seed("messages", "a", json!({ "createdAt": "2026-01-01T00:00:00.000000Z" }));
        backend.seed("messages", "b", json!({ "name": "no timestamp" }));
        backend.seed("messages", "c", json!({ "createdAt": "2026-03-01T00:00:00.000000Z" }));

        let docs = backend
            .query_collection(
                "messages",
                Query::all().order_by("createdAt", Direction::Descending),
            )
            .await
            .unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let backend = MemoryBackend::new();
        backend.fail_writes("orders");
        assert!(matches!(
            backend.add_document("orders", DocumentWrite::default()).await,
            Err(ClientError::Forbidden(_))
        ));
        // Other collections are unaffected
        assert!(backend.add_document("messages", DocumentWrite::default()).await.is_ok());

        backend.set_offline(true);
        assert!(backend.count_collection("messages").await.is_err());

        backend.recover();
        assert!(backend.add_document("orders", DocumentWrite::default()).await.is_ok());
        assert_eq!(backend.count("orders"), 1);
    }

    #[tokio::test]
    async fn test_sign_in() {
        let backend = MemoryBackend::new().with_account("owner@abana.test", "secret");

        let err = backend.sign_in("owner@abana.test", "wrong").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthError::InvalidCredentials)));
        assert!(backend.current_session().is_none());

        let session = backend.sign_in("owner@abana.test", "secret").await.unwrap();
        assert_eq!(session.email, "owner@abana.test");
        assert_eq!(backend.current_session(), Some(session));

        backend.sign_out().await.unwrap();
        assert!(backend.current_session().is_none());
    }
}
