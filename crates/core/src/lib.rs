//! Marketplace Core - Shared domain types.
//!
//! Used by:
//! - `client` - API client, session store, and auth context
//! - `cli` - Command-line storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O and no HTTP. Every resource
//! the backend returns has an explicit schema here so responses are
//! decode-validated at the boundary instead of flowing through as untyped
//! JSON.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, prices, order status, and resource schemas

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
