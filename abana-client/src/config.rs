//! Client configuration

/// Default Firestore REST endpoint
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";
/// Default Identity Toolkit endpoint
pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Configuration for connecting to the managed backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Project identifier (e.g. "street-13-restaurant")
    pub project_id: String,

    /// Public web API key
    pub api_key: String,

    /// Database id inside the project
    pub database: String,

    /// Firestore REST base URL
    pub firestore_url: String,

    /// Identity Toolkit base URL
    pub auth_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a configuration for the given project and API key
    pub fn new(project_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: api_key.into(),
            database: "(default)".to_string(),
            firestore_url: DEFAULT_FIRESTORE_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            timeout: 30,
        }
    }

    /// Point both services at another host (emulator, proxy)
    pub fn with_base_urls(
        mut self,
        firestore_url: impl Into<String>,
        auth_url: impl Into<String>,
    ) -> Self {
        self.firestore_url = firestore_url.into();
        self.auth_url = auth_url.into();
        self
    }

    /// Use a named database instead of `(default)`
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Resource path prefix of every document:
    /// `projects/{project}/databases/{database}/documents`
    pub fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.project_id, self.database
        )
    }

    /// Full URL of the documents root
    pub fn documents_url(&self) -> String {
        format!(
            "{}/{}",
            self.firestore_url.trim_end_matches('/'),
            self.documents_root()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_url() {
        let config = ClientConfig::new("street-13", "key");
        assert_eq!(
            config.documents_url(),
            "https://firestore.googleapis.com/v1/projects/street-13/databases/(default)/documents"
        );
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::new("p", "k")
            .with_base_urls("http://localhost:8080/v1/", "http://localhost:9099/v1")
            .with_database("staging")
            .with_timeout(5);
        assert_eq!(
            config.documents_url(),
            "http://localhost:8080/v1/projects/p/databases/staging/documents"
        );
        assert_eq!(config.timeout, 5);
    }
}
