//! Catalog resources: products, categories, and styles.
//!
//! These mirror the backend's serializers field for field. The list endpoint
//! returns [`Product`] (category and style flattened to IDs plus names), the
//! detail endpoint returns [`ProductDetail`] (category and style nested).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId, StyleId};
use super::price::Price;

// =============================================================================
// Taxonomy
// =============================================================================

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// URL-safe identifier, used for detail lookups.
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Number of products in this category at request time.
    pub products_count: u32,
}

/// Visual style a product is tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub id: StyleId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub products_count: u32,
}

// =============================================================================
// Products
// =============================================================================

/// Product as returned by list endpoints and embedded in carts, favorites,
/// and orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category: CategoryId,
    pub category_name: String,
    /// Products outlive their style; the backend nulls the reference.
    pub style: Option<StyleId>,
    pub style_name: Option<String>,
    pub price: Price,
    /// Image URL.
    pub image: String,
    pub author: String,
    /// Average rating on a 0-5 scale.
    pub rating: Decimal,
    pub reviews_count: u32,
    pub downloads: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Product as returned by `GET /products/{id}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category: Category,
    pub style: Option<Style>,
    pub price: Price,
    pub image: String,
    pub author: String,
    pub rating: Decimal,
    pub reviews_count: u32,
    pub downloads: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sort order accepted by the product list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductOrdering {
    PriceAsc,
    PriceDesc,
    RatingAsc,
    RatingDesc,
    DownloadsAsc,
    DownloadsDesc,
    Oldest,
    Newest,
}

impl ProductOrdering {
    /// Value for the `ordering` query parameter.
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::PriceAsc => "price",
            Self::PriceDesc => "-price",
            Self::RatingAsc => "rating",
            Self::RatingDesc => "-rating",
            Self::DownloadsAsc => "downloads",
            Self::DownloadsDesc => "-downloads",
            Self::Oldest => "created_at",
            Self::Newest => "-created_at",
        }
    }
}

impl std::str::FromStr for ProductOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(Self::PriceAsc),
            "-price" => Ok(Self::PriceDesc),
            "rating" => Ok(Self::RatingAsc),
            "-rating" => Ok(Self::RatingDesc),
            "downloads" => Ok(Self::DownloadsAsc),
            "-downloads" => Ok(Self::DownloadsDesc),
            "created_at" => Ok(Self::Oldest),
            "-created_at" => Ok(Self::Newest),
            _ => Err(format!("invalid product ordering: {s}")),
        }
    }
}

/// Filters for `GET /products/`.
///
/// Unset fields are left out of the query string entirely. `category` and
/// `style` match by display name, not slug.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub style: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub ordering: Option<ProductOrdering>,
    pub search: Option<String>,
}

impl ProductFilter {
    /// Query pairs in the order the backend documents them.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(style) = &self.style {
            pairs.push(("style", style.clone()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("max_price", max.to_string()));
        }
        if let Some(ordering) = self.ordering {
            pairs.push(("ordering", ordering.as_query().to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }

    /// True when no filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PRODUCT_JSON: &str = r#"{
        "id": 3,
        "name": "Night Sky Pack",
        "slug": "night-sky-pack",
        "description": "Twelve starfield textures",
        "category": 1,
        "category_name": "Textures",
        "style": null,
        "style_name": null,
        "price": "12.50",
        "image": "https://cdn.example.com/night.png",
        "author": "Vera",
        "rating": "4.75",
        "reviews_count": 19,
        "downloads": 402,
        "tags": ["space", "dark"],
        "is_featured": true,
        "created_at": "2025-03-01T10:15:00.123456Z"
    }"#;

    #[test]
    fn test_product_decodes_list_shape() {
        let product: Product = serde_json::from_str(PRODUCT_JSON).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.style, None);
        assert_eq!(product.price, Price::new(Decimal::new(1250, 2)));
        assert_eq!(product.rating, Decimal::new(475, 2));
        assert_eq!(product.tags, vec!["space", "dark"]);
    }

    #[test]
    fn test_product_rejects_wrong_shape() {
        let result = serde_json::from_str::<Product>(r#"{"id": "three"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_filter_only_serializes_set_fields() {
        let filter = ProductFilter {
            style: Some("Minimal".to_string()),
            max_price: Some(Decimal::new(50, 0)),
            ordering: Some(ProductOrdering::RatingDesc),
            ..ProductFilter::default()
        };

        assert_eq!(
            filter.query_pairs(),
            vec![
                ("style", "Minimal".to_string()),
                ("max_price", "50".to_string()),
                ("ordering", "-rating".to_string()),
            ]
        );
        assert!(ProductFilter::default().is_empty());
    }

    #[test]
    fn test_ordering_round_trips_through_query_value() {
        for ordering in [ProductOrdering::PriceAsc, ProductOrdering::Newest] {
            let parsed: ProductOrdering = ordering.as_query().parse().unwrap();
            assert_eq!(parsed, ordering);
        }
        assert!("popularity".parse::<ProductOrdering>().is_err());
    }
}
