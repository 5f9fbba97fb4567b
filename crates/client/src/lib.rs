//! Marketplace storefront client library.
//!
//! The data-fetching and session layer of the storefront: every view talks to
//! the backend through this crate.
//!
//! # Components
//!
//! - [`session`] - Durable holder for the access/refresh token pair
//! - [`api`] - The single egress point for backend requests: base URL
//!   prefixing, bearer-token injection, error normalization, typed decoding
//! - [`auth`] - Reactive authenticated/anonymous state with login, register,
//!   and logout
//! - [`notify`] - Notification seam the auth context reports outcomes through
//! - [`config`] - Environment-driven configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use marketplace_client::{ApiClient, AuthContext, ClientConfig, FileSessionStore, TracingNotifier};
//!
//! let config = ClientConfig::from_env()?;
//! let session = Arc::new(FileSessionStore::open(&config.session_file)?);
//! let api = ApiClient::new(&config, session)?;
//! let auth = AuthContext::new(api.clone(), Arc::new(TracingNotifier))?;
//!
//! auth.login("vera", "hunter2".into()).await?;
//! let cart = api.cart().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod notify;
pub mod session;

pub use api::{ApiClient, LoginCredentials, RegisterForm, RegisteredUser};
pub use auth::{AuthContext, AuthState};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ValidationError};
pub use notify::{Notification, NotificationLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use session::{FileSessionStore, MemorySessionStore, SessionError, SessionStore, TokenPair};
