//! Marketplace REST API client.
//!
//! # Architecture
//!
//! - One [`ApiClient`] per process; cloning shares the HTTP connection pool
//!   and the injected session store
//! - Every request goes to `base_url + path`
//! - Paths under [`PROTECTED_PREFIXES`] carry `Authorization: Bearer <access>`
//!   when a token is stored; no other path ever does
//! - Non-success responses become [`ApiError::Api`] with a normalized message
//! - Success bodies are decoded into the schemas in `marketplace_core`; a
//!   mismatch is [`ApiError::Decode`], never silently passed through
//!
//! # Endpoints
//!
//! - `auth` - login, register, logout
//! - `catalog` - products, categories, styles
//! - `favorites` - list, add, remove
//! - `cart` - list, add, remove, clear, total
//! - `orders` - list, show, create, checkout

mod auth;
mod cart;
mod catalog;
mod favorites;
mod orders;

pub use auth::{LoginCredentials, RegisterForm, RegisteredUser};

use std::sync::Arc;

use reqwest::Method;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ValidationError, normalize_error_message};
use crate::session::SessionStore;

/// Path prefixes that receive the bearer token when one is stored.
pub const PROTECTED_PREFIXES: &[&str] = &[
    "/cart",
    "/orders",
    "/favorites",
    "/categories",
    "/styles",
    "/products",
];

/// Whether a relative request path falls under the bearer-token policy.
#[must_use]
pub fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

// =============================================================================
// Request descriptor
// =============================================================================

/// One outbound call: built per request, never stored.
#[derive(Debug)]
struct ApiRequest {
    method: Method,
    /// Relative path, including any query string.
    path: String,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        }
    }

    fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the marketplace REST API.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client bound to `session`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client fails to build.
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.clone(),
                session,
            }),
        })
    }

    /// API root every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// The session store this client reads and writes.
    #[must_use]
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.inner.session
    }

    /// Send a request and check its status.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.inner.base_url, request.path);
        let mut builder = self.inner.client.request(request.method, url);

        if is_protected(&request.path)
            && let Some(token) = self.inner.session.access_token()?
        {
            builder = builder.bearer_auth(token.expose_secret());
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = normalize_error_message(status.as_u16(), &body);
            warn!(status = %status, message = %message, "API request failed");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(status = %status, "API request succeeded");
        Ok(response)
    }

    /// Send a request and decode the response body as `T`.
    async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let path = request.path.clone();
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;

        // Success bodies can carry credentials (`/login/`); never log them.
        serde_json::from_slice(&bytes).map_err(|source| {
            warn!(
                path = %path,
                error = %source,
                body_len = bytes.len(),
                "API response did not match schema"
            );
            ApiError::Decode { path, source }
        })
    }

    /// Send a request whose response body carries nothing the caller needs.
    async fn request_empty(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request).await?;
        Ok(())
    }
}

/// Reject slugs that would need escaping in a path segment.
fn validate_slug(slug: &str) -> Result<&str, ValidationError> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(slug)
    } else {
        Err(ValidationError::InvalidSlug(slug.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_prefixes() {
        for path in [
            "/cart/",
            "/cart/clear/",
            "/orders/",
            "/favorites/9/",
            "/categories/",
            "/styles/",
            "/products/?search=moon",
            "/products/4/",
        ] {
            assert!(is_protected(path), "{path} should be protected");
        }
    }

    #[test]
    fn test_unprotected_paths() {
        for path in ["/login/", "/register/", "/token/refresh/", "/", "/users/cart/"] {
            assert!(!is_protected(path), "{path} should not be protected");
        }
    }

    #[test]
    fn test_validate_slug() {
        assert_eq!(validate_slug("dark-mode_2").unwrap(), "dark-mode_2");
        assert!(validate_slug("").is_err());
        assert!(validate_slug("a/b").is_err());
        assert!(validate_slug("with space").is_err());
    }

    #[test]
    fn test_post_request_carries_body() {
        let request = ApiRequest::post("/cart/", serde_json::json!({"product_id": 1}));
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body.unwrap()["product_id"], 1);
    }
}
