//! Domain types for the marketplace.
//!
//! Typed IDs, decimal prices, and the resource schemas the backend returns.

pub mod cart;
pub mod catalog;
pub mod id;
pub mod order;
pub mod price;
pub mod status;

pub use cart::{CartItem, CartTotal, Favorite, cart_subtotal};
pub use catalog::{Category, Product, ProductDetail, ProductFilter, ProductOrdering, Style};
pub use id::*;
pub use order::{Order, OrderItem};
pub use price::Price;
pub use status::OrderStatus;
