//! Auth context state transitions and notifications against a live backend.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;

use marketplace_client::{
    AuthContext, AuthState, FileSessionStore, MemorySessionStore, NotificationLevel,
    RecordingNotifier, RegisterForm, SessionStore,
};
use marketplace_integration_tests::MockBackend;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use uuid::Uuid;

async fn setup(
    session: Arc<dyn SessionStore>,
) -> (MockBackend, AuthContext, Arc<RecordingNotifier>) {
    let backend = MockBackend::start().await.unwrap();
    let api = backend.client(session);
    let notifier = Arc::new(RecordingNotifier::new());
    let auth = AuthContext::new(api, notifier.clone()).unwrap();
    (backend, auth, notifier)
}

fn temp_session_path() -> PathBuf {
    std::env::temp_dir().join(format!("marketplace-auth-{}.json", Uuid::new_v4()))
}

fn grant(backend: &MockBackend) {
    backend.respond(
        "POST",
        "/login/",
        200,
        &json!({ "access": "A", "refresh": "R" }),
    );
}

#[tokio::test]
async fn login_stores_pair_and_authenticates() {
    let (backend, auth, notifier) = setup(Arc::new(MemorySessionStore::new())).await;
    grant(&backend);

    auth.login("vera", SecretString::from("hunter2")).await.unwrap();

    let session = auth.api().session();
    assert_eq!(session.access_token().unwrap().unwrap().expose_secret(), "A");
    assert_eq!(session.refresh_token().unwrap().unwrap().expose_secret(), "R");
    assert!(auth.is_authenticated());

    let request = backend.last_request().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(
        request.body.unwrap(),
        json!({ "username": "vera", "password": "hunter2" })
    );

    let last = notifier.last().unwrap();
    assert_eq!(last.title, "Welcome back!");
    assert_eq!(last.description, "Successfully logged in");
    assert_eq!(last.level, NotificationLevel::Info);
}

#[tokio::test]
async fn failed_login_keeps_state_and_reports_message() {
    let (backend, auth, notifier) = setup(Arc::new(MemorySessionStore::new())).await;
    backend.respond(
        "POST",
        "/login/",
        401,
        &json!({ "detail": "No active account found with the given credentials" }),
    );

    let err = auth
        .login("vera", SecretString::from("wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(auth.state(), AuthState::Anonymous);
    let last = notifier.last().unwrap();
    assert_eq!(last.title, "Login failed");
    assert_eq!(
        last.description,
        "No active account found with the given credentials"
    );
    assert_eq!(last.level, NotificationLevel::Destructive);
}

#[tokio::test]
async fn subscribers_observe_login_then_logout() {
    let (backend, auth, _) = setup(Arc::new(MemorySessionStore::new())).await;
    grant(&backend);
    let mut rx = auth.subscribe();
    assert_eq!(*rx.borrow_and_update(), AuthState::Anonymous);

    auth.login("vera", SecretString::from("hunter2")).await.unwrap();
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), AuthState::Authenticated);

    auth.logout().unwrap();
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow(), AuthState::Anonymous);
}

#[tokio::test]
async fn register_does_not_log_in() {
    let (backend, auth, notifier) = setup(Arc::new(MemorySessionStore::new())).await;
    backend.respond(
        "POST",
        "/register/",
        201,
        &json!({ "username": "vera", "email": "vera@example.com" }),
    );
    let form = RegisterForm::new("vera", "vera@example.com", "pw-12345", "pw-12345");

    let user = auth.register(&form).await.unwrap();

    assert_eq!(user.username.as_deref(), Some("vera"));
    assert!(!auth.is_authenticated());
    assert!(auth.api().session().access_token().unwrap().is_none());
    let last = notifier.last().unwrap();
    assert_eq!(last.title, "Account created!");
    assert_eq!(last.description, "Please log in with your credentials");
}

#[tokio::test]
async fn register_rejection_reports_backend_message() {
    let (backend, auth, notifier) = setup(Arc::new(MemorySessionStore::new())).await;
    backend.respond(
        "POST",
        "/register/",
        400,
        &json!({ "username": ["A user with that username already exists."] }),
    );
    let form = RegisterForm::new("vera", "vera@example.com", "pw-12345", "pw-12345");

    auth.register(&form).await.unwrap_err();

    let last = notifier.last().unwrap();
    assert_eq!(last.title, "Registration failed");
    assert_eq!(last.description, "A user with that username already exists.");
}

#[tokio::test]
async fn mismatched_passwords_send_nothing() {
    let (backend, auth, notifier) = setup(Arc::new(MemorySessionStore::new())).await;
    let form = RegisterForm::new("vera", "vera@example.com", "one", "two");

    auth.register(&form).await.unwrap_err();

    assert!(backend.requests().is_empty());
    assert_eq!(notifier.notifications().len(), 1);
}

#[tokio::test]
async fn logout_twice_equals_once() {
    let (backend, auth, notifier) = setup(Arc::new(MemorySessionStore::new())).await;
    grant(&backend);
    auth.login("vera", SecretString::from("hunter2")).await.unwrap();

    auth.logout().unwrap();
    auth.logout().unwrap();

    assert!(!auth.is_authenticated());
    assert!(auth.api().session().access_token().unwrap().is_none());
    assert!(auth.api().session().refresh_token().unwrap().is_none());
    // login only; logout is local
    assert_eq!(backend.requests().len(), 1);
    let titles: Vec<_> = notifier
        .notifications()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, ["Welcome back!", "Logged out", "Logged out"]);
}

#[tokio::test]
async fn file_session_survives_restart() {
    let path = temp_session_path();
    let (backend, auth, _) = setup(Arc::new(FileSessionStore::open(&path).unwrap())).await;
    grant(&backend);
    auth.login("vera", SecretString::from("hunter2")).await.unwrap();

    // A fresh process opening the same file starts logged in
    let reopened = Arc::new(FileSessionStore::open(&path).unwrap());
    let api = backend.client(reopened);
    let restarted = AuthContext::new(api, Arc::new(RecordingNotifier::new())).unwrap();
    assert!(restarted.is_authenticated());

    backend.respond("GET", "/cart/", 200, &json!([]));
    restarted.api().cart().await.unwrap();
    assert_eq!(
        backend.last_request().unwrap().authorization.as_deref(),
        Some("Bearer A")
    );

    restarted.logout().unwrap();
    assert!(!path.exists());
}
