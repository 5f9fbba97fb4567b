//! Cart endpoints.

use marketplace_core::{CartItem, CartItemId, CartTotal, ProductId};
use serde_json::json;
use tracing::instrument;

use super::{ApiClient, ApiRequest};
use crate::error::ApiError;

impl ApiClient {
    /// List the lines in the current user's cart.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with status 401 when not logged in.
    #[instrument(skip(self))]
    pub async fn cart(&self) -> Result<Vec<CartItem>, ApiError> {
        self.request(ApiRequest::get("/cart/")).await
    }

    /// Add `quantity` units of a product. If the product is already in the
    /// cart its line's quantity grows instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartItem, ApiError> {
        let body = json!({ "product_id": product_id, "quantity": quantity });
        self.request(ApiRequest::post("/cart/", body)).await
    }

    /// Remove one cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, item_id: CartItemId) -> Result<(), ApiError> {
        self.request_empty(ApiRequest::delete(format!("/cart/{item_id}/")))
            .await
    }

    /// Remove every line from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<(), ApiError> {
        self.request_empty(ApiRequest::delete("/cart/clear/")).await
    }

    /// Cart total and line count as computed by the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn cart_total(&self) -> Result<CartTotal, ApiError> {
        self.request(ApiRequest::get("/cart/total/")).await
    }
}
