//! Integration tests for the marketplace client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p marketplace-integration-tests
//! ```
//!
//! No external services are needed: every test starts a [`MockBackend`], an
//! in-process axum server on `127.0.0.1:0` that records each request and
//! replies with canned responses registered per method and path.
//!
//! # Test Categories
//!
//! - `auth_header_policy` - Bearer token injection by path prefix
//! - `error_normalization` - Error bodies to user-facing messages
//! - `auth_context` - Login, register, logout state and notifications
//! - `catalog` - Products, filters, categories, styles
//! - `cart_and_orders` - Favorites, cart, orders, checkout
//! - `log_redaction` - Tokens and emails never reach the logs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod fixtures;

use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use marketplace_client::{ApiClient, ClientConfig, SessionStore};
use serde_json::Value;
use tokio::net::TcpListener;

/// One request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path without the query string, including the `/api` prefix.
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    /// Parsed JSON body; `None` when the request had no body.
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct CannedResponse {
    status: StatusCode,
    body: String,
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<(String, String), CannedResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process stand-in for the marketplace REST backend.
///
/// Unregistered routes answer `404 {"detail":"Not found."}`.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    /// Bind to an ephemeral port and start serving in the background.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            // The server lives until the test runtime shuts down
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, state })
    }

    /// API root to configure the client with (`http://127.0.0.1:<port>/api`).
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Build a client pointed at this backend.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn client(&self, session: Arc<dyn SessionStore>) -> ApiClient {
        let config = ClientConfig::new(&self.api_url()).expect("mock backend URL is valid");
        ApiClient::new(&config, session).expect("HTTP client builds")
    }

    /// Reply to `method path` with a JSON body. `path` is relative to the API
    /// root and excludes any query string, e.g. `"/cart/"`.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: &Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    /// Reply to `method path` with a verbatim body.
    ///
    /// # Panics
    ///
    /// Panics if `status` is not a valid HTTP status code.
    #[allow(clippy::expect_used)]
    pub fn respond_raw(&self, method: &str, path: &str, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.state
            .routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                (method.to_string(), format!("/api{path}")),
                CannedResponse {
                    status,
                    body: body.to_string(),
                },
            );
    }

    /// Every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let recorded = RecordedRequest {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: if body.is_empty() {
            None
        } else {
            serde_json::from_slice(&body).ok()
        },
    };

    let key = (recorded.method.clone(), recorded.path.clone());
    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(recorded);

    let canned = state
        .routes
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
        .cloned();

    match canned {
        Some(CannedResponse { status, .. }) if status == StatusCode::NO_CONTENT => {
            status.into_response()
        }
        Some(CannedResponse { status, body }) => (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"detail":"Not found."}"#,
        )
            .into_response(),
    }
}
