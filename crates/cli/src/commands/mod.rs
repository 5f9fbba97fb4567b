//! Command implementations.
//!
//! Each command talks to the backend through one shared [`Context`] and
//! writes its result to stdout as pretty JSON.

pub mod catalog;
pub mod session;
pub mod shop;

use std::sync::Arc;

use marketplace_client::{
    ApiClient, ApiError, AuthContext, ClientConfig, ConfigError, FileSessionStore, SessionError,
    TracingNotifier,
};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Everything a command needs: the API client and the auth context over the
/// same file-backed session.
pub struct Context {
    pub api: ApiClient,
    pub auth: AuthContext,
}

impl Context {
    /// Build the context from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` if configuration is invalid or the session file
    /// cannot be read.
    pub fn from_env() -> Result<Self, CommandError> {
        let config = ClientConfig::from_env()?;
        let session = Arc::new(FileSessionStore::open(&config.session_file)?);
        tracing::debug!(
            base_url = %config.base_url,
            session_file = %config.session_file.display(),
            "Client configured"
        );

        let api = ApiClient::new(&config, session)?;
        let auth = AuthContext::new(api.clone(), Arc::new(TracingNotifier))?;
        Ok(Self { api, auth })
    }
}

/// Write a value to stdout as pretty JSON.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
