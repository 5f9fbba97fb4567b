//! Order endpoints.

use marketplace_core::{Order, OrderId};
use serde_json::{Value, json};
use tracing::{info, instrument};

use super::{ApiClient, ApiRequest};
use crate::error::ApiError;

/// Body for `POST /orders/`: the email is sent only when it has content.
fn order_body(email: Option<&str>) -> Value {
    match email {
        Some(email) if !email.trim().is_empty() => json!({ "email": email }),
        _ => json!({}),
    }
}

impl ApiClient {
    /// List the current user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with status 401 when not logged in.
    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        self.request(ApiRequest::get("/orders/")).await
    }

    /// Get one order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with status 404 if the order does not exist or
    /// belongs to someone else.
    #[instrument(skip(self))]
    pub async fn order(&self, id: OrderId) -> Result<Order, ApiError> {
        self.request(ApiRequest::get(format!("/orders/{id}/"))).await
    }

    /// Turn the current cart into an order.
    ///
    /// Without an email the backend uses the account's address.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` if the cart is empty or the email is invalid.
    #[instrument(skip(self, email), fields(has_email = email.is_some()))]
    pub async fn create_order(&self, email: Option<&str>) -> Result<Order, ApiError> {
        let order: Order = self
            .request(ApiRequest::post("/orders/", order_body(email)))
            .await?;
        info!(order_id = %order.id, total = %order.total_price, "Order created");
        Ok(order)
    }

    /// Place an order from the cart, then clear the cart.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error. If the order was created but
    /// clearing fails, the error is returned and the order still exists.
    #[instrument(skip(self, email))]
    pub async fn checkout(&self, email: Option<&str>) -> Result<Order, ApiError> {
        let order = self.create_order(email).await?;
        self.clear_cart().await?;
        Ok(order)
    }
}
