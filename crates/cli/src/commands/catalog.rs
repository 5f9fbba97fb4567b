//! Catalog commands.

use marketplace_core::{ProductFilter, ProductId};

use super::{CommandError, Context, print_json};

pub async fn products(ctx: &Context, filter: &ProductFilter) -> Result<(), CommandError> {
    let products = ctx.api.products(filter).await?;
    tracing::info!(count = products.len(), "Products loaded");
    print_json(&products)
}

pub async fn product(ctx: &Context, id: ProductId) -> Result<(), CommandError> {
    print_json(&ctx.api.product(id).await?)
}

pub async fn featured(ctx: &Context) -> Result<(), CommandError> {
    print_json(&ctx.api.featured_products().await?)
}

pub async fn popular(ctx: &Context) -> Result<(), CommandError> {
    print_json(&ctx.api.popular_products().await?)
}

pub async fn categories(ctx: &Context, slug: Option<&str>) -> Result<(), CommandError> {
    match slug {
        Some(slug) => print_json(&ctx.api.category(slug).await?),
        None => print_json(&ctx.api.categories().await?),
    }
}

pub async fn styles(ctx: &Context, slug: Option<&str>) -> Result<(), CommandError> {
    match slug {
        Some(slug) => print_json(&ctx.api.style(slug).await?),
        None => print_json(&ctx.api.styles().await?),
    }
}
