//! Marketplace CLI - Browse the catalog and shop from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Log in (tokens persist in the session file)
//! mp login -u vera -p hunter2
//!
//! # Browse
//! mp products list --category "UI Kits" --ordering -price
//! mp products show 4
//!
//! # Shop
//! mp cart add 4 --quantity 2
//! mp checkout --email vera@example.com
//! ```
//!
//! # Commands
//!
//! - `login`, `register`, `logout`, `status` - Session management
//! - `products`, `categories`, `styles` - Catalog
//! - `favorites`, `cart`, `orders`, `checkout` - Shopping
//!
//! Every command prints its result as pretty JSON on stdout.
//!
//! # Environment Variables
//!
//! See `marketplace_client::config` for the client settings. `SENTRY_DSN`
//! enables error reporting.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use marketplace_core::{CartItemId, FavoriteId, OrderId, ProductId, ProductOrdering};
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "mp")]
#[command(author, version, about = "Marketplace storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session tokens
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long, env = "MARKETPLACE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account (does not log in)
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Password confirmation; must equal `--password`
        #[arg(long)]
        password2: String,
    },
    /// Forget the stored session
    Logout,
    /// Show whether a session is stored
    Status,
    /// Browse products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// List categories
    Categories {
        /// Show one category by slug
        slug: Option<String>,
    },
    /// List styles
    Styles {
        /// Show one style by slug
        slug: Option<String>,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// View and place orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Place an order from the cart and clear the cart
    Checkout {
        /// Contact email for the order (defaults to the account's)
        #[arg(short, long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products, optionally filtered
    List {
        /// Category name
        #[arg(long)]
        category: Option<String>,

        /// Style name
        #[arg(long)]
        style: Option<String>,

        #[arg(long)]
        min_price: Option<Decimal>,

        #[arg(long)]
        max_price: Option<Decimal>,

        /// `price`, `-price`, `rating`, `-rating`, `created_at`, `-created_at`,
        /// `downloads`, or `-downloads`
        #[arg(long, allow_hyphen_values = true)]
        ordering: Option<ProductOrdering>,

        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one product
    Show { id: ProductId },
    /// List featured products
    Featured,
    /// List the most downloaded products
    Popular,
}

#[derive(Subcommand)]
enum FavoritesAction {
    List,
    /// Mark a product as a favorite
    Add { product: ProductId },
    /// Remove a favorite by its favorite ID
    Remove { favorite: FavoriteId },
}

#[derive(Subcommand)]
enum CartAction {
    List,
    /// Add a product to the cart
    Add {
        product: ProductId,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a cart line by its item ID
    Remove { item: CartItemId },
    /// Empty the cart
    Clear,
    /// Show the backend-computed total
    Total,
}

#[derive(Subcommand)]
enum OrdersAction {
    List,
    Show {
        id: OrderId,
    },
    /// Turn the cart into an order without clearing it
    Create {
        #[arg(short, long)]
        email: Option<String>,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok().filter(|v| !v.is_empty())?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: std::env::var("SENTRY_ENVIRONMENT")
                .ok()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // SENTRY_DSN may live in .env
    let _ = dotenvy::dotenv();

    let _sentry_guard = init_sentry();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "marketplace_client=info,marketplace_cli=info".into());

    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::from_env()?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::session::login(&ctx, &username, password).await?;
        }
        Commands::Register {
            username,
            email,
            password,
            password2,
        } => commands::session::register(&ctx, username, email, password, password2).await?,
        Commands::Logout => commands::session::logout(&ctx)?,
        Commands::Status => commands::session::status(&ctx)?,
        Commands::Products { action } => match action {
            ProductsAction::List {
                category,
                style,
                min_price,
                max_price,
                ordering,
                search,
            } => {
                let filter = marketplace_core::ProductFilter {
                    category,
                    style,
                    min_price,
                    max_price,
                    ordering,
                    search,
                };
                commands::catalog::products(&ctx, &filter).await?;
            }
            ProductsAction::Show { id } => commands::catalog::product(&ctx, id).await?,
            ProductsAction::Featured => commands::catalog::featured(&ctx).await?,
            ProductsAction::Popular => commands::catalog::popular(&ctx).await?,
        },
        Commands::Categories { slug } => commands::catalog::categories(&ctx, slug.as_deref()).await?,
        Commands::Styles { slug } => commands::catalog::styles(&ctx, slug.as_deref()).await?,
        Commands::Favorites { action } => match action {
            FavoritesAction::List => commands::shop::favorites(&ctx).await?,
            FavoritesAction::Add { product } => commands::shop::add_favorite(&ctx, product).await?,
            FavoritesAction::Remove { favorite } => {
                commands::shop::remove_favorite(&ctx, favorite).await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::List => commands::shop::cart(&ctx).await?,
            CartAction::Add { product, quantity } => {
                commands::shop::add_to_cart(&ctx, product, quantity).await?;
            }
            CartAction::Remove { item } => commands::shop::remove_from_cart(&ctx, item).await?,
            CartAction::Clear => commands::shop::clear_cart(&ctx).await?,
            CartAction::Total => commands::shop::cart_total(&ctx).await?,
        },
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::shop::orders(&ctx).await?,
            OrdersAction::Show { id } => commands::shop::order(&ctx, id).await?,
            OrdersAction::Create { email } => {
                commands::shop::create_order(&ctx, email.as_deref()).await?;
            }
        },
        Commands::Checkout { email } => commands::shop::checkout(&ctx, email.as_deref()).await?,
    }
    Ok(())
}
