//! Credentials and contact details stay out of the logs.
//!
//! Warnings reach Sentry as events in the CLI, so anything logged here is
//! effectively published.

#![allow(clippy::unwrap_used)]

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use marketplace_client::{ApiError, LoginCredentials, MemorySessionStore, SessionStore, TokenPair};
use marketplace_integration_tests::{MockBackend, fixtures};
use serde_json::json;
use tracing::subscriber::DefaultGuard;

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap_or_else(PoisonError::into_inner)).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Route this thread's events, with span fields, into a buffer.
fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

#[tokio::test]
async fn malformed_login_reply_does_not_log_tokens() {
    let (logs, _guard) = capture_logs();
    let backend = MockBackend::start().await.unwrap();
    backend.respond(
        "POST",
        "/login/",
        200,
        &json!({ "access": "leaked-access-token" }),
    );
    let api = backend.client(Arc::new(MemorySessionStore::new()));

    let err = api
        .login(&LoginCredentials::new("vera", "hunter2"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
    assert!(api.session().access_token().unwrap().is_none());
    let out = logs.contents();
    assert!(out.contains("API response did not match schema"), "{out}");
    assert!(!out.contains("leaked-access-token"), "{out}");
    assert!(!out.contains("hunter2"), "{out}");
}

#[tokio::test]
async fn order_email_is_not_a_span_field() {
    let (logs, _guard) = capture_logs();
    let backend = MockBackend::start().await.unwrap();
    backend.respond("POST", "/orders/", 201, &fixtures::order(11, "gift@example.com"));
    backend.respond_raw("DELETE", "/cart/clear/", 204, "");
    let api = backend.client(Arc::new(MemorySessionStore::with_tokens(TokenPair::new(
        "A", "R",
    ))));

    api.create_order(Some("gift@example.com")).await.unwrap();
    api.checkout(Some("gift@example.com")).await.unwrap();

    let out = logs.contents();
    assert!(out.contains("Order created"), "{out}");
    assert!(!out.contains("gift@example.com"), "{out}");
}
