//! Product, category, and style endpoints.

use marketplace_core::{Category, Product, ProductDetail, ProductFilter, ProductId, Style};
use tracing::instrument;
use url::form_urlencoded;

use super::{ApiClient, ApiRequest, validate_slug};
use crate::error::ApiError;

/// Build `/products/` with the filter's query string, if any.
fn products_path(filter: &ProductFilter) -> String {
    let pairs = filter.query_pairs();
    if pairs.is_empty() {
        return "/products/".to_string();
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("/products/?{query}")
}

impl ApiClient {
    // =========================================================================
    // Products
    // =========================================================================

    /// List products matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply is not a product list.
    #[instrument(skip(self))]
    pub async fn products(&self, filter: &ProductFilter) -> Result<Vec<Product>, ApiError> {
        self.request(ApiRequest::get(products_path(filter))).await
    }

    /// Get one product with its category and style expanded.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with status 404 if the product does not exist.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<ProductDetail, ApiError> {
        self.request(ApiRequest::get(format!("/products/{id}/")))
            .await
    }

    /// List featured products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn featured_products(&self) -> Result<Vec<Product>, ApiError> {
        self.request(ApiRequest::get("/products/featured/")).await
    }

    /// The most downloaded products (at most twelve).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn popular_products(&self) -> Result<Vec<Product>, ApiError> {
        self.request(ApiRequest::get("/products/popular/")).await
    }

    // =========================================================================
    // Categories & Styles
    // =========================================================================

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.request(ApiRequest::get("/categories/")).await
    }

    /// Get a category by slug.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for a malformed slug, or `ApiError::Api`
    /// if the category does not exist.
    #[instrument(skip(self))]
    pub async fn category(&self, slug: &str) -> Result<Category, ApiError> {
        let slug = validate_slug(slug)?;
        self.request(ApiRequest::get(format!("/categories/{slug}/")))
            .await
    }

    /// List all styles.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn styles(&self) -> Result<Vec<Style>, ApiError> {
        self.request(ApiRequest::get("/styles/")).await
    }

    /// Get a style by slug.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` for a malformed slug, or `ApiError::Api`
    /// if the style does not exist.
    #[instrument(skip(self))]
    pub async fn style(&self, slug: &str) -> Result<Style, ApiError> {
        let slug = validate_slug(slug)?;
        self.request(ApiRequest::get(format!("/styles/{slug}/")))
            .await
    }
}
