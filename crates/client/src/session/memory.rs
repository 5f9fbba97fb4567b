//! In-process session store.

use std::sync::{PoisonError, RwLock};

use secrecy::{ExposeSecret, SecretString};

use super::{SessionError, SessionStore, TokenPair};

/// Session store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    tokens: RwLock<Option<TokenPair>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token pair.
    #[must_use]
    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: RwLock::new(Some(tokens)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, tokens: &TokenPair) -> Result<(), SessionError> {
        let mut slot = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(tokens.clone());
        Ok(())
    }

    fn access_token(&self) -> Result<Option<SecretString>, SessionError> {
        let slot = self.tokens.read().unwrap_or_else(PoisonError::into_inner);
        Ok(slot
            .as_ref()
            .map(|t| SecretString::from(t.access.expose_secret())))
    }

    fn refresh_token(&self) -> Result<Option<SecretString>, SessionError> {
        let slot = self.tokens.read().unwrap_or_else(PoisonError::into_inner);
        Ok(slot
            .as_ref()
            .map(|t| SecretString::from(t.refresh.expose_secret())))
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut slot = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_has_no_tokens() {
        let store = MemorySessionStore::new();
        assert!(store.access_token().unwrap().is_none());
        assert!(store.refresh_token().unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites_both_tokens() {
        let store = MemorySessionStore::with_tokens(TokenPair::new("old-a", "old-r"));
        store.save(&TokenPair::new("A", "R")).unwrap();

        assert_eq!(store.access_token().unwrap().unwrap().expose_secret(), "A");
        assert_eq!(store.refresh_token().unwrap().unwrap().expose_secret(), "R");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = MemorySessionStore::with_tokens(TokenPair::new("A", "R"));
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.access_token().unwrap().is_none());
        assert!(store.refresh_token().unwrap().is_none());
    }

    #[test]
    fn test_token_pair_debug_is_redacted() {
        let debug = format!("{:?}", TokenPair::new("secret-access", "secret-refresh"));
        assert!(!debug.contains("secret-access"));
        assert!(!debug.contains("secret-refresh"));
    }
}
