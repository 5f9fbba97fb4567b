//! Cart and favorites resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::Product;
use super::id::{CartItemId, FavoriteId};
use super::price::Price;

/// A line in the current user's cart.
///
/// Adding a product that is already in the cart bumps its quantity instead of
/// creating a second line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product: Product,
    pub quantity: u32,
    /// `product.price * quantity`, computed by the backend.
    pub total_price: Price,
    pub created_at: DateTime<Utc>,
}

/// Response of `GET /cart/total/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotal {
    pub total: Price,
    pub items_count: u32,
}

/// A product the current user marked as a favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// Favorite record ID; this is what `DELETE /favorites/{id}/` takes.
    pub id: FavoriteId,
    pub product: Product,
    pub created_at: DateTime<Utc>,
}

/// Sum of cart line totals, for callers that hold a fetched cart.
#[must_use]
pub fn cart_subtotal(items: &[CartItem]) -> Price {
    items.iter().map(|item| item.total_price).sum()
}
