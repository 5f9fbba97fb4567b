//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MARKETPLACE_API_BASE_URL` - Backend origin plus `/api` prefix
//!   (default: `http://localhost:8000/api`)
//! - `MARKETPLACE_SESSION_FILE` - Where the file session store keeps tokens
//!   (default: `.marketplace-session.json`)
//! - `MARKETPLACE_USER_AGENT` - User agent sent with every request
//!   (default: `marketplace-client/<version>`)
//!
//! The base URL is read once when the client is built and never changes
//! afterwards.

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default backend API root.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Default location of the persisted session.
pub const DEFAULT_SESSION_FILE: &str = ".marketplace-session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid base URL {0}: {1}")]
    InvalidBaseUrl(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root with no trailing slash; request paths are appended verbatim.
    pub base_url: String,
    /// Path of the JSON file used by `FileSessionStore`.
    pub session_file: PathBuf,
    /// User agent header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Build a configuration for the given API root with default settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if `base_url` is not an absolute
    /// `http` or `https` URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            user_agent: default_user_agent(),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_env_or_default("MARKETPLACE_API_BASE_URL", DEFAULT_BASE_URL);
        let base_url = normalize_base_url(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("MARKETPLACE_API_BASE_URL".to_string(), e.to_string())
        })?;

        let session_file = PathBuf::from(get_env_or_default(
            "MARKETPLACE_SESSION_FILE",
            DEFAULT_SESSION_FILE,
        ));
        if session_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "MARKETPLACE_SESSION_FILE".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let user_agent =
            get_optional_env("MARKETPLACE_USER_AGENT").unwrap_or_else(default_user_agent);

        Ok(Self {
            base_url,
            session_file,
            user_agent,
        })
    }

    /// Override the session file location.
    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Validate an API root and strip trailing slashes.
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidBaseUrl(trimmed.to_string(), e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl(
            trimmed.to_string(),
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ConfigError::InvalidBaseUrl(
            trimmed.to_string(),
            "must not carry a query or fragment".to_string(),
        ));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

fn default_user_agent() -> String {
    format!("marketplace-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let config = ClientConfig::new("https://shop.example.com/api/").unwrap();
        assert_eq!(config.base_url, "https://shop.example.com/api");
    }

    #[test]
    fn test_new_keeps_default_port_and_prefix() {
        let config = ClientConfig::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert_eq!(config.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
        assert!(config.user_agent.starts_with("marketplace-client/"));
    }

    #[test]
    fn test_new_rejects_relative_url() {
        let err = ClientConfig::new("/api").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_, _)));
    }

    #[test]
    fn test_new_rejects_non_http_scheme() {
        let err = ClientConfig::new("ftp://shop.example.com/api").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_new_rejects_query() {
        assert!(ClientConfig::new("http://localhost:8000/api?x=1").is_err());
    }

    #[test]
    fn test_with_session_file() {
        let config = ClientConfig::new(DEFAULT_BASE_URL)
            .unwrap()
            .with_session_file("/tmp/tokens.json");
        assert_eq!(config.session_file, PathBuf::from("/tmp/tokens.json"));
    }
}
