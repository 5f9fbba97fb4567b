//! Favorites endpoints.

use marketplace_core::{Favorite, FavoriteId, ProductId};
use serde_json::json;
use tracing::instrument;

use super::{ApiClient, ApiRequest};
use crate::error::ApiError;

impl ApiClient {
    /// List the current user's favorites.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with status 401 when not logged in.
    #[instrument(skip(self))]
    pub async fn favorites(&self) -> Result<Vec<Favorite>, ApiError> {
        self.request(ApiRequest::get("/favorites/")).await
    }

    /// Mark a product as a favorite. Adding an existing favorite returns it
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn add_favorite(&self, product_id: ProductId) -> Result<Favorite, ApiError> {
        let body = json!({ "product_id": product_id });
        self.request(ApiRequest::post("/favorites/", body)).await
    }

    /// Remove a favorite by its favorite ID (not the product ID).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn remove_favorite(&self, favorite_id: FavoriteId) -> Result<(), ApiError> {
        self.request_empty(ApiRequest::delete(format!("/favorites/{favorite_id}/")))
            .await
    }
}
