//! Favorites, cart, and order commands.
//!
//! All of these need a logged-in session; without one the backend answers
//! 401 and the command fails with its message.

use marketplace_core::{CartItemId, FavoriteId, OrderId, ProductId, cart_subtotal};
use serde_json::json;

use super::{CommandError, Context, print_json};

// =============================================================================
// Favorites
// =============================================================================

pub async fn favorites(ctx: &Context) -> Result<(), CommandError> {
    print_json(&ctx.api.favorites().await?)
}

pub async fn add_favorite(ctx: &Context, product: ProductId) -> Result<(), CommandError> {
    print_json(&ctx.api.add_favorite(product).await?)
}

pub async fn remove_favorite(ctx: &Context, favorite: FavoriteId) -> Result<(), CommandError> {
    ctx.api.remove_favorite(favorite).await?;
    print_json(&json!({ "removed": favorite }))
}

// =============================================================================
// Cart
// =============================================================================

/// Print the cart lines with a locally computed subtotal.
pub async fn cart(ctx: &Context) -> Result<(), CommandError> {
    let items = ctx.api.cart().await?;
    let subtotal = cart_subtotal(&items);
    print_json(&json!({ "items": items, "subtotal": subtotal }))
}

pub async fn add_to_cart(
    ctx: &Context,
    product: ProductId,
    quantity: u32,
) -> Result<(), CommandError> {
    print_json(&ctx.api.add_to_cart(product, quantity).await?)
}

pub async fn remove_from_cart(ctx: &Context, item: CartItemId) -> Result<(), CommandError> {
    ctx.api.remove_from_cart(item).await?;
    print_json(&json!({ "removed": item }))
}

pub async fn clear_cart(ctx: &Context) -> Result<(), CommandError> {
    ctx.api.clear_cart().await?;
    print_json(&json!({ "cleared": true }))
}

pub async fn cart_total(ctx: &Context) -> Result<(), CommandError> {
    print_json(&ctx.api.cart_total().await?)
}

// =============================================================================
// Orders
// =============================================================================

pub async fn orders(ctx: &Context) -> Result<(), CommandError> {
    print_json(&ctx.api.orders().await?)
}

pub async fn order(ctx: &Context, id: OrderId) -> Result<(), CommandError> {
    print_json(&ctx.api.order(id).await?)
}

pub async fn create_order(ctx: &Context, email: Option<&str>) -> Result<(), CommandError> {
    print_json(&ctx.api.create_order(email).await?)
}

pub async fn checkout(ctx: &Context, email: Option<&str>) -> Result<(), CommandError> {
    print_json(&ctx.api.checkout(email).await?)
}
