//! Bearer token injection by path prefix.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use marketplace_client::{LoginCredentials, MemorySessionStore, RegisterForm, TokenPair};
use marketplace_core::{ProductFilter, ProductId};
use marketplace_integration_tests::{MockBackend, fixtures};
use serde_json::json;

fn logged_in() -> Arc<MemorySessionStore> {
    Arc::new(MemorySessionStore::with_tokens(TokenPair::new(
        "access-A", "refresh-R",
    )))
}

#[tokio::test]
async fn protected_path_with_token_sends_bearer() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond("GET", "/cart/", 200, &json!([]));
    let api = backend.client(logged_in());

    api.cart().await.unwrap();

    let request = backend.last_request().unwrap();
    assert_eq!(request.path, "/api/cart/");
    assert_eq!(request.authorization.as_deref(), Some("Bearer access-A"));
}

#[tokio::test]
async fn protected_path_without_token_sends_no_header() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond("GET", "/products/", 200, &json!([]));
    let api = backend.client(Arc::new(MemorySessionStore::new()));

    api.products(&ProductFilter::default()).await.unwrap();

    assert_eq!(backend.last_request().unwrap().authorization, None);
}

#[tokio::test]
async fn every_protected_prefix_carries_the_token() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond("GET", "/cart/", 200, &json!([]));
    backend.respond("GET", "/orders/", 200, &json!([]));
    backend.respond("GET", "/favorites/", 200, &json!([]));
    backend.respond("GET", "/categories/", 200, &json!([]));
    backend.respond("GET", "/styles/", 200, &json!([]));
    backend.respond("GET", "/products/", 200, &json!([]));
    let api = backend.client(logged_in());

    api.cart().await.unwrap();
    api.orders().await.unwrap();
    api.favorites().await.unwrap();
    api.categories().await.unwrap();
    api.styles().await.unwrap();
    api.products(&ProductFilter::default()).await.unwrap();

    let requests = backend.requests();
    assert_eq!(requests.len(), 6);
    for request in requests {
        assert_eq!(
            request.authorization.as_deref(),
            Some("Bearer access-A"),
            "{} should carry the token",
            request.path
        );
    }
}

#[tokio::test]
async fn login_never_sends_bearer_even_when_logged_in() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond(
        "POST",
        "/login/",
        200,
        &json!({ "access": "new-A", "refresh": "new-R" }),
    );
    let api = backend.client(logged_in());

    api.login(&LoginCredentials::new("vera", "hunter2"))
        .await
        .unwrap();

    assert_eq!(backend.last_request().unwrap().authorization, None);
}

#[tokio::test]
async fn register_never_sends_bearer() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond(
        "POST",
        "/register/",
        201,
        &json!({ "username": "vera", "email": "vera@example.com" }),
    );
    let api = backend.client(logged_in());
    let form = RegisterForm::new("vera", "vera@example.com", "pw-12345", "pw-12345");

    api.register(&form).await.unwrap();

    let request = backend.last_request().unwrap();
    assert_eq!(request.authorization, None);
    assert_eq!(
        request.body.unwrap(),
        json!({
            "username": "vera",
            "email": "vera@example.com",
            "password": "pw-12345",
            "password2": "pw-12345"
        })
    );
}

#[tokio::test]
async fn json_bodies_declare_content_type() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond("POST", "/favorites/", 201, &fixtures::favorite(3, 4));
    let api = backend.client(logged_in());

    api.add_favorite(ProductId::new(4)).await.unwrap();

    let request = backend.last_request().unwrap();
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
    assert_eq!(request.body.unwrap(), json!({ "product_id": 4 }));
}
