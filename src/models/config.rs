//! Application configuration structures.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Board API connection settings
    #[serde(default)]
    pub monday: MondayConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Known expiry dates for subjects whose real date lives on another board
    #[serde(default)]
    pub fallback_expiry: FallbackExpiry,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("MONDAY_API_TOKEN") {
            self.monday.api_token = token;
        }
        if let Some(board_id) = lookup("MONDAY_BOARD_ID") {
            self.monday.board_id = board_id;
        }
        if let Some(api_url) = lookup("MONDAY_API_URL") {
            self.monday.api_url = api_url;
        }
        if let Some(port) = lookup("PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value {:?}", port),
            }
        }
        if let Some(frontend_url) = lookup("FRONTEND_URL") {
            self.server.frontend_url = frontend_url;
        }
        if let Some(environment) = lookup("APP_ENV").or_else(|| lookup("NODE_ENV")) {
            self.server.environment = environment;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.monday.api_token.trim().is_empty() {
            return Err(AppError::config("monday.api_token is empty"));
        }
        if self.monday.board_id.trim().is_empty() {
            return Err(AppError::config("monday.board_id is empty"));
        }
        if self.monday.board_id.trim().parse::<u64>().is_err() {
            return Err(AppError::config("monday.board_id must be numeric"));
        }
        if self.monday.timeout_secs == 0 {
            return Err(AppError::config("monday.timeout_secs must be > 0"));
        }
        Url::parse(&self.monday.api_url)?;
        Url::parse(&self.server.frontend_url)?;
        Ok(())
    }
}

/// Which board query shape to request from the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryVariant {
    /// Board groups with their items
    #[default]
    Groups,
    /// Items page with nested subitems
    Subitems,
    /// Items page with a reference to the owning group
    Items,
}

/// Board API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MondayConfig {
    /// GraphQL endpoint
    #[serde(default = "defaults::api_url")]
    pub api_url: String,

    /// API token sent in the `Authorization` header
    #[serde(default)]
    pub api_token: String,

    /// Identifier of the certificate board
    #[serde(default)]
    pub board_id: String,

    /// Query shape to request
    #[serde(default)]
    pub query: QueryVariant,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for API requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for MondayConfig {
    fn default() -> Self {
        Self {
            api_url: defaults::api_url(),
            api_token: String::new(),
            board_id: String::new(),
            query: QueryVariant::default(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listening port
    #[serde(default = "defaults::port")]
    pub port: u16,

    /// Origin of the web page allowed to call the API
    #[serde(default = "defaults::frontend_url")]
    pub frontend_url: String,

    /// Directory holding the static search page
    #[serde(default = "defaults::static_dir")]
    pub static_dir: String,

    /// Deployment environment; only `development` echoes error details
    #[serde(default = "defaults::environment")]
    pub environment: String,
}

impl ServerConfig {
    /// Whether internal error messages may be shown to clients.
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }

    /// Origins accepted by the CORS layer.
    pub fn allowed_origins(&self) -> Vec<String> {
        vec![
            self.frontend_url.clone(),
            format!("http://localhost:{}", self.port),
            "http://127.0.0.1:8080".to_string(),
        ]
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: defaults::port(),
            frontend_url: defaults::frontend_url(),
            static_dir: defaults::static_dir(),
            environment: defaults::environment(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is not set
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Emit JSON lines instead of plain text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            json: false,
        }
    }
}

/// Subject to raw expiry date table, matched case-insensitively.
///
/// Stands in for subjects whose expiry is mirrored from a board the API
/// does not resolve for this integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct FallbackExpiry {
    entries: BTreeMap<String, String>,
}

impl FallbackExpiry {
    /// Build a table from subject/date pairs.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.as_ref().trim().to_uppercase(), v.into()))
                .collect(),
        }
    }

    /// Raw expiry date for a subject, if known.
    pub fn lookup(&self, subject: &str) -> Option<&str> {
        self.entries
            .get(&subject.trim().to_uppercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FallbackExpiry {
    fn default() -> Self {
        Self::new(defaults::fallback_expiry())
    }
}

impl From<BTreeMap<String, String>> for FallbackExpiry {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self::new(map)
    }
}

impl From<FallbackExpiry> for BTreeMap<String, String> {
    fn from(table: FallbackExpiry) -> Self {
        table.entries
    }
}

mod defaults {
    // Board API defaults
    pub fn api_url() -> String {
        "https://api.monday.com/v2".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        concat!("certificate-tracker/", env!("CARGO_PKG_VERSION")).into()
    }

    // Server defaults
    pub fn port() -> u16 {
        3002
    }
    pub fn frontend_url() -> String {
        "http://localhost:8080".into()
    }
    pub fn static_dir() -> String {
        "frontend".into()
    }
    pub fn environment() -> String {
        "development".into()
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }

    // Subjects whose expiry is only present on a linked board
    pub fn fallback_expiry() -> Vec<(&'static str, &'static str)> {
        vec![
            ("SMS", "Wed, Dec 29, 2027"),
            ("TAWS", "Sun, Aug 3, 2025"),
            ("WINDSHEAR", "Mon, Dec 15, 2025"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.monday.api_token = "secret".into();
        config.monday.board_id = "1234567890".into();
        config
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3002);
        assert_eq!(config.monday.query, QueryVariant::Groups);
        assert!(config.server.is_development());
        assert_eq!(config.fallback_expiry.len(), 3);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[monday]
board_id = "42"
query = "subitems"

[server]
environment = "production"

[fallback_expiry]
crm = "2030-01-31"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.monday.board_id, "42");
        assert_eq!(config.monday.query, QueryVariant::Subitems);
        assert_eq!(config.monday.timeout_secs, 30);
        assert!(!config.server.is_development());
        assert_eq!(config.fallback_expiry.lookup("CRM"), Some("2030-01-31"));
        assert_eq!(config.fallback_expiry.lookup("SMS"), None);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("/nonexistent/config.toml");
        assert_eq!(config.server.port, 3002);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MONDAY_API_TOKEN", "tok"),
            ("MONDAY_BOARD_ID", "99"),
            ("PORT", "8081"),
            ("APP_ENV", "production"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env_with(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.monday.api_token, "tok");
        assert_eq!(config.monday.board_id, "99");
        assert_eq!(config.server.port, 8081);
        assert!(!config.server.is_development());
    }

    #[test]
    fn test_env_node_env_fallback() {
        let mut config = Config::default();
        config.apply_env_with(|key| (key == "NODE_ENV").then(|| "production".to_string()));
        assert!(!config.server.is_development());

        let mut config = Config::default();
        config.apply_env_with(|key| match key {
            "APP_ENV" => Some("development".to_string()),
            "NODE_ENV" => Some("production".to_string()),
            _ => None,
        });
        assert!(config.server.is_development());
    }

    #[test]
    fn test_env_invalid_port_ignored() {
        let mut config = Config::default();
        config.apply_env_with(|key| (key == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(config.server.port, 3002);
    }

    #[test]
    fn test_validate() {
        assert!(valid_config().validate().is_ok());
        assert!(Config::default().validate().is_err());

        let mut config = valid_config();
        config.monday.board_id = "abc".into();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let mut config = valid_config();
        config.monday.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.server.frontend_url = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fallback_lookup_case_insensitive() {
        let table = FallbackExpiry::default();
        assert_eq!(table.lookup("sms"), Some("Wed, Dec 29, 2027"));
        assert_eq!(table.lookup(" Taws "), Some("Sun, Aug 3, 2025"));
        assert_eq!(table.lookup("CRM"), None);
    }

    #[test]
    fn test_allowed_origins() {
        let origins = ServerConfig::default().allowed_origins();
        assert!(origins.contains(&"http://localhost:3002".to_string()));
        assert!(origins.contains(&"http://localhost:8080".to_string()));
    }
}
