//! Firestore + Identity Toolkit backend over REST
//!
//! | Operation | Request |
//! |-----------|---------|
//! | get | `GET documents/{collection}/{id}` |
//! | set / add | `POST documents:commit` (update + `REQUEST_TIME` transforms) |
//! | delete | `DELETE documents/{collection}/{id}` |
//! | query | `POST documents:runQuery` |
//! | count | `POST documents:runAggregationQuery` |
//! | sign-in | `POST accounts:signInWithPassword` |
//!
//! Writes go through `:commit` so server timestamps and merge masks use the
//! same code path.

pub mod value;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::sync::watch;

use crate::backend::{AuthService, DocumentStore};
use crate::config::ClientConfig;
use crate::document::{Direction, Document, DocumentWrite, Query};
use crate::error::{AuthError, ClientError, ClientResult};
use crate::session::{Session, SessionHub};

/// Length of generated document ids
const AUTO_ID_LEN: usize = 20;

/// Google API error envelope
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Value,
}

impl RawDocument {
    fn into_document(self) -> Document {
        let id = self.name.rsplit('/').next().unwrap_or_default().to_string();
        Document::new(id, value::decode_fields(&self.fields))
    }
}

#[derive(Debug, Deserialize)]
struct RunQueryEntry {
    #[serde(default)]
    document: Option<RawDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregationEntry {
    #[serde(default)]
    result: Option<AggregationResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregationResult {
    #[serde(default)]
    aggregate_fields: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<String>,
    local_id: String,
}

/// REST client for the managed Firebase services
#[derive(Debug)]
pub struct FirebaseBackend {
    config: ClientConfig,
    client: Client,
    sessions: SessionHub,
}

impl FirebaseBackend {
    /// Create a backend from configuration
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            config,
            client,
            sessions: SessionHub::new(),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn document_name(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.config.documents_root(), collection, id)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.config.documents_url(), collection, id)
    }

    /// Request with API key and, when signed in, the bearer token
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut req = self
            .client
            .request(method, url)
            .query(&[("key", self.config.api_key.as_str())]);
        if let Some(token) = self.sessions.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            tracing::warn!(status = %status, message = %message, "Backend request failed");
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::FORBIDDEN => ClientError::Forbidden(message),
                StatusCode::NOT_FOUND => ClientError::NotFound(message),
                StatusCode::BAD_REQUEST | StatusCode::CONFLICT => ClientError::Validation(message),
                StatusCode::SERVICE_UNAVAILABLE | StatusCode::TOO_MANY_REQUESTS => {
                    ClientError::Unavailable(message)
                }
                _ => ClientError::Internal(message),
            });
        }
        Ok(response.json().await?)
    }

    /// Firestore `update` write with optional mask and server timestamp transforms
    fn build_write(
        &self,
        collection: &str,
        id: &str,
        write: &DocumentWrite,
        mask: Option<Vec<String>>,
        must_not_exist: bool,
    ) -> Value {
        let mut entry = json!({
            "update": {
                "name": self.document_name(collection, id),
                "fields": value::encode_fields(&write.fields),
            }
        });
        if let Some(paths) = mask {
            entry["updateMask"] = json!({ "fieldPaths": paths });
        }
        if must_not_exist {
            entry["currentDocument"] = json!({ "exists": false });
        }
        if !write.server_timestamp_fields.is_empty() {
            entry["updateTransforms"] = Value::Array(
                write
                    .server_timestamp_fields
                    .iter()
                    .map(|f| json!({ "fieldPath": f, "setToServerValue": "REQUEST_TIME" }))
                    .collect(),
            );
        }
        entry
    }

    async fn commit(&self, writes: Vec<Value>) -> ClientResult<()> {
        let url = format!("{}:commit", self.config.documents_url());
        let response = self
            .request(Method::POST, &url)
            .json(&json!({ "writes": writes }))
            .send()
            .await?;
        let _: Value = Self::handle_response(response).await?;
        Ok(())
    }

    fn structured_query(collection: &str, query: &Query) -> Value {
        let mut structured = json!({ "from": [{ "collectionId": collection }] });
        if let Some(order) = &query.order_by {
            let direction = match order.direction {
                Direction::Ascending => "ASCENDING",
                Direction::Descending => "DESCENDING",
            };
            structured["orderBy"] = json!([{
                "field": { "fieldPath": order.field },
                "direction": direction,
            }]);
        }
        if let Some(limit) = query.limit {
            structured["limit"] = json!(limit);
        }
        structured
    }
}

fn auto_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(AUTO_ID_LEN);
    id
}

#[async_trait]
impl DocumentStore for FirebaseBackend {
    async fn get_document(&self, collection: &str, id: &str) -> ClientResult<Option<Document>> {
        let url = self.document_url(collection, id);
        tracing::debug!(collection, id, "GET document");
        let response = self.request(Method::GET, &url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let raw: RawDocument = Self::handle_response(response).await?;
        Ok(Some(raw.into_document()))
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        write: DocumentWrite,
        merge: bool,
    ) -> ClientResult<()> {
        tracing::debug!(collection, id, merge, "SET document");
        let mask = merge.then(|| write.fields.keys().cloned().collect());
        let entry = self.build_write(collection, id, &write, mask, false);
        self.commit(vec![entry]).await
    }

    async fn add_document(&self, collection: &str, write: DocumentWrite) -> ClientResult<String> {
        let id = auto_id();
        tracing::debug!(collection, id = %id, "ADD document");
        let entry = self.build_write(collection, &id, &write, None, true);
        self.commit(vec![entry]).await?;
        Ok(id)
    }

    async fn delete_document(&self, collection: &str, id: &str) -> ClientResult<()> {
        let url = self.document_url(collection, id);
        tracing::debug!(collection, id, "DELETE document");
        let response = self.request(Method::DELETE, &url).send().await?;
        let _: Value = Self::handle_response(response).await?;
        Ok(())
    }

    async fn query_collection(
        &self,
        collection: &str,
        query: Query,
    ) -> ClientResult<Vec<Document>> {
        let url = format!("{}:runQuery", self.config.documents_url());
        let body = json!({ "structuredQuery": Self::structured_query(collection, &query) });
        tracing::debug!(collection, ?query, "QUERY collection");
        let response = self.request(Method::POST, &url).json(&body).send().await?;
        let entries: Vec<RunQueryEntry> = Self::handle_response(response).await?;
        Ok(entries
            .into_iter()
            .filter_map(|e| e.document)
            .map(RawDocument::into_document)
            .collect())
    }

    async fn count_collection(&self, collection: &str) -> ClientResult<usize> {
        let url = format!("{}:runAggregationQuery", self.config.documents_url());
        let body = json!({
            "structuredAggregationQuery": {
                "structuredQuery": Self::structured_query(collection, &Query::all()),
                "aggregations": [{ "alias": "total", "count": {} }],
            }
        });
        let response = self.request(Method::POST, &url).json(&body).send().await?;
        let entries: Vec<AggregationEntry> = Self::handle_response(response).await?;
        let total = entries
            .into_iter()
            .find_map(|e| e.result)
            .and_then(|r| r.aggregate_fields.get("total").map(value::decode))
            .and_then(|v| v.as_u64())
            .ok_or_else(|| ClientError::InvalidResponse("missing count aggregate".into()))?;
        Ok(total as usize)
    }
}

#[async_trait]
impl AuthService for FirebaseBackend {
    async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Session> {
        let url = format!(
            "{}/accounts:signInWithPassword",
            self.config.auth_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&json!({ "email": email, "password": password, "returnSecureToken": true }))
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await?;
            let code = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            tracing::warn!(email, code = %code, "Sign-in rejected");
            return Err(AuthError::from_provider_code(&code).into());
        }

        let body: SignInResponse = response.json().await?;
        let expires_at = body
            .expires_in
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .map(|secs| Utc::now() + Duration::seconds(secs));
        let session = Session {
            uid: body.local_id,
            email: if body.email.is_empty() {
                email.to_string()
            } else {
                body.email
            },
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_at,
        };
        tracing::info!(uid = %session.uid, "Signed in");
        self.sessions.set(session.clone());
        Ok(session)
    }

    async fn sign_out(&self) -> ClientResult<()> {
        // ID tokens are bearer tokens; dropping ours is the whole sign-out
        self.sessions.clear();
        tracing::info!("Signed out");
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
    use serde_json::Map;

    fn backend() -> FirebaseBackend {
        FirebaseBackend::new(ClientConfig::new("street-13", "key")).unwrap()
    }

    #[test]
    fn test_document_name() {
        assert_eq!(
            backend().document_name("menuItems", "abc"),
            "projects/street-13/databases/(default)/documents/menuItems/abc"
        );
    }

    #[test]
    fn test_raw_document_id_is_last_segment() {
        let raw = RawDocument {
            name: "projects/p/databases/(default)/documents/messages/m42".into(),
            fields: json!({ "read": { "booleanValue": false } }),
        };
        let doc = raw.into_document();
        assert_eq!(doc.id, "m42");
        assert_eq!(doc.fields["read"], json!(false));
    }

    #[test]
    fn test_add_write_requires_absent_document_and_stamps_time() {
        let mut fields = Map::new();
        fields.insert("name".into(), json!("Ada"));
        let write = DocumentWrite::new(fields).with_server_timestamp("createdAt");
        let entry = backend().build_write("messages", "id1", &write, None, true);

        assert_eq!(entry["currentDocument"]["exists"], json!(false));
        assert_eq!(
            entry["updateTransforms"][0],
            json!({ "fieldPath": "createdAt", "setToServerValue": "REQUEST_TIME" })
        );
        assert_eq!(entry["update"]["fields"]["name"], json!({ "stringValue": "Ada" }));
        assert!(entry.get("updateMask").is_none());
    }

    #[test]
    fn test_merge_write_masks_written_fields() {
        let mut fields = Map::new();
        fields.insert("heroTitle".into(), json!("Hello"));
        let write = DocumentWrite::new(fields);
        let entry = backend().build_write(
            "settings",
            "config",
            &write,
            Some(vec!["heroTitle".into()]),
            false,
        );
        assert_eq!(entry["updateMask"]["fieldPaths"], json!(["heroTitle"]));
        assert!(entry.get("currentDocument").is_none());
    }

    #[test]
    fn test_structured_query() {
        let query = Query::all()
            .order_by("createdAt", Direction::Descending)
            .limit(50);
        let structured = FirebaseBackend::structured_query("messages", &query);
        assert_eq!(structured["from"][0]["collectionId"], "messages");
        assert_eq!(structured["orderBy"][0]["direction"], "DESCENDING");
        assert_eq!(structured["orderBy"][0]["field"]["fieldPath"], "createdAt");
        assert_eq!(structured["limit"], 50);
    }

    #[test]
    fn test_auto_id_length() {
        let id = auto_id();
        assert_eq!(id.len(), AUTO_ID_LEN);
        assert_ne!(id, auto_id());
    }
}
