//! Orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::Product;
use super::id::{OrderId, OrderItemId, UserId};
use super::price::Price;
use super::status::OrderStatus;

/// An order placed from the cart.
///
/// The backend snapshots every cart line into an [`OrderItem`] at the
/// product's price at checkout time, then empties the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user: UserId,
    pub user_email: String,
    pub status: OrderStatus,
    pub total_price: Price,
    /// Contact email; defaults server-side to the account email.
    pub email: String,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of an [`Order`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product: Product,
    pub quantity: u32,
    /// Unit price captured at checkout.
    pub price: Price,
    pub total_price: Price,
}

impl Order {
    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
