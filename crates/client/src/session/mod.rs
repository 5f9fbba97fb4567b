//! Session store: durable holder for the access/refresh token pair.
//!
//! The store is the single owner of the credentials. It is injected into the
//! API client (which reads the access token for protected requests and writes
//! the pair on login) rather than reached as ambient global state, so tests
//! substitute [`MemorySessionStore`] for the persistent [`FileSessionStore`].
//!
//! Tokens are never expired, rotated, or refreshed locally: an access token is
//! assumed valid until a request using it fails.

mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors raised by persistent session stores.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the session file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The session file exists but is not valid session JSON.
    #[error("corrupt session file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing the session failed.
    #[error("failed to encode session: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Access/refresh credential pair issued by `POST /login/`.
///
/// Both halves are secrets; `Debug` output is redacted.
#[derive(Debug)]
pub struct TokenPair {
    pub access: SecretString,
    /// Stored alongside the access token but never used to renew it.
    pub refresh: SecretString,
}

impl TokenPair {
    /// Build a pair from raw token strings.
    #[must_use]
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: SecretString::from(access.into()),
            refresh: SecretString::from(refresh.into()),
        }
    }
}

impl Clone for TokenPair {
    fn clone(&self) -> Self {
        Self::new(self.access.expose_secret(), self.refresh.expose_secret())
    }
}

/// Durable key-value holder for the token pair.
///
/// Implementations are internally synchronized. Concurrent `save` calls are
/// not ordered: the last write wins.
pub trait SessionStore: Send + Sync {
    /// Overwrite both tokens.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing storage cannot be written.
    fn save(&self, tokens: &TokenPair) -> Result<(), SessionError>;

    /// The stored access token, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing storage cannot be read.
    fn access_token(&self) -> Result<Option<SecretString>, SessionError>;

    /// The stored refresh token, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing storage cannot be read.
    fn refresh_token(&self) -> Result<Option<SecretString>, SessionError>;

    /// Remove both tokens. Clearing an empty store is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backing storage cannot be written.
    fn clear(&self) -> Result<(), SessionError>;
}
