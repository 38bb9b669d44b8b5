use std::path::PathBuf;

use abana_client::ClientConfig;

use crate::money::DEFAULT_CURRENCY_SYMBOL;

/// Testimonials shown on the storefront
pub const DEFAULT_TESTIMONIAL_LIMIT: usize = 3;
/// Messages listed in the admin console, newest first
pub const DEFAULT_MESSAGE_LIMIT: usize = 50;
/// Category given to items created from the admin console
pub const DEFAULT_MENU_CATEGORY: &str = "milk";

/// Site configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | FIREBASE_PROJECT_ID | abana-cafe | Backend project |
/// | FIREBASE_API_KEY | (empty) | Public web API key |
/// | FIREBASE_DATABASE | (default) | Database id |
/// | FIRESTORE_URL | Google endpoint | Document store base URL (emulators) |
/// | AUTH_URL | Google endpoint | Auth service base URL (emulators) |
/// | REQUEST_TIMEOUT_SECS | 30 | Backend request timeout |
/// | WORK_DIR | ./data | Local files (cart slot, logs) |
/// | CART_DB | {WORK_DIR}/local.redb | Cart slot file |
/// | CURRENCY_SYMBOL | ₦ | Prefix for every amount |
/// | TESTIMONIAL_LIMIT | 3 | Testimonials fetched |
/// | MESSAGE_LIMIT | 50 | Admin messages fetched |
/// | DEFAULT_MENU_CATEGORY | milk | Category for new menu items |
/// | LOG_LEVEL | info | Log filter when RUST_LOG is unset |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | (unset) | Daily rolling log directory |
///
/// # Example
///
/// ```ignore
/// FIREBASE_PROJECT_ID=abana-cafe FIREBASE_API_KEY=... cargo run -p abana-site
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub project_id: String,
    pub api_key: String,
    pub database: String,
    pub firestore_url: String,
    pub auth_url: String,
    pub request_timeout_secs: u64,
    /// Directory for local files
    pub work_dir: PathBuf,
    /// redb file holding the cart slot
    pub cart_db_path: PathBuf,
    pub currency_symbol: String,
    pub testimonial_limit: usize,
    pub message_limit: usize,
    pub default_menu_category: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables, defaulting what is unset
    pub fn from_env() -> Self {
        let work_dir = PathBuf::from(env_or("WORK_DIR", "./data"));
        let cart_db_path = std::env::var("CART_DB")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| work_dir.join("local.redb"));

        Self {
            project_id: env_or("FIREBASE_PROJECT_ID", "abana-cafe"),
            api_key: env_or("FIREBASE_API_KEY", ""),
            database: env_or("FIREBASE_DATABASE", "(default)"),
            firestore_url: env_or("FIRESTORE_URL", abana_client::config::DEFAULT_FIRESTORE_URL),
            auth_url: env_or("AUTH_URL", abana_client::config::DEFAULT_AUTH_URL),
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", 30),
            work_dir,
            cart_db_path,
            currency_symbol: env_or("CURRENCY_SYMBOL", DEFAULT_CURRENCY_SYMBOL),
            testimonial_limit: env_parse("TESTIMONIAL_LIMIT", DEFAULT_TESTIMONIAL_LIMIT),
            message_limit: env_parse("MESSAGE_LIMIT", DEFAULT_MESSAGE_LIMIT),
            default_menu_category: env_or("DEFAULT_MENU_CATEGORY", DEFAULT_MENU_CATEGORY),
            log_level: env_or("LOG_LEVEL", "info"),
            log_json: env_parse("LOG_JSON", false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.trim().is_empty()),
        }
    }

    /// Environment config rooted in another work directory
    ///
    /// Mostly for tests
    pub fn with_work_dir(work_dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.cart_db_path = config.work_dir.join("local.redb");
        config
    }

    /// Backend connection settings
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.project_id, &self.api_key)
            .with_database(&self.database)
            .with_base_urls(&self.firestore_url, &self.auth_url)
            .with_timeout(self.request_timeout_secs)
    }

    /// Whether a real backend can be reached with this configuration
    pub fn has_backend_credentials(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_work_dir_moves_cart_db() {
        let config = Config::with_work_dir("/tmp/abana-test");
        assert_eq!(
            config.cart_db_path,
            PathBuf::from("/tmp/abana-test").join("local.redb")
        );
    }

    #[test]
    fn test_client_config_carries_project() {
        let mut config = Config::with_work_dir("/tmp/abana-test");
        config.project_id = "street-13".into();
        config.api_key = "key".into();
        let client = config.client_config();
        assert_eq!(client.project_id, "street-13");
        assert_eq!(client.api_key, "key");
        assert!(config.has_backend_credentials());
    }
}
