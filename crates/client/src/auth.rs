//! Authentication context.
//!
//! A two-state machine (`Anonymous`, `Authenticated`) sitting between views
//! and the API client:
//!
//! - the initial state comes from whether the session store holds an access
//!   token; the token is not checked against the server
//! - `login` success moves to `Authenticated`; failure leaves the state alone
//! - `logout` moves to `Anonymous` once the stored tokens are gone; if the
//!   store cannot be cleared the state is left alone
//! - `register` never changes state: registering does not log in
//!
//! Every outcome is reported through the injected [`Notifier`], and failures
//! are also returned so the caller can react (for example, not navigating
//! away). Views that need to re-render on change subscribe to the state
//! channel.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::instrument;

use crate::api::{ApiClient, LoginCredentials, RegisterForm, RegisteredUser};
use crate::error::ApiError;
use crate::notify::{Notification, Notifier};
use crate::session::SessionError;

/// Whether the session currently holds credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthState {
    Anonymous,
    Authenticated,
}

/// Reactive authentication state plus the operations that change it.
#[derive(Clone)]
pub struct AuthContext {
    inner: Arc<AuthContextInner>,
}

struct AuthContextInner {
    api: ApiClient,
    state: watch::Sender<AuthState>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl AuthContext {
    /// Create a context over `api`, sharing the session store the client was
    /// built with.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the session store cannot be read.
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Result<Self, SessionError> {
        let initial = if api.session().access_token()?.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        };
        let (state, _) = watch::channel(initial);

        Ok(Self {
            inner: Arc::new(AuthContextInner {
                api,
                state,
                notifier,
            }),
        })
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        *self.inner.state.borrow()
    }

    /// Whether a user is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state() == AuthState::Authenticated
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.state.subscribe()
    }

    /// The API client this context drives.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Log in and move to `Authenticated`.
    ///
    /// # Errors
    ///
    /// Returns the API client's error after emitting a "Login failed"
    /// notification; the state is left unchanged.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: SecretString) -> Result<(), ApiError> {
        let credentials = LoginCredentials {
            username: username.to_string(),
            password,
        };

        match self.inner.api.login(&credentials).await {
            Ok(_) => {
                self.inner.state.send_replace(AuthState::Authenticated);
                self.notify(Notification::info("Welcome back!", "Successfully logged in"));
                Ok(())
            }
            Err(err) => {
                self.notify(Notification::destructive("Login failed", err.user_message()));
                Err(err)
            }
        }
    }

    /// Create an account. The state does not change.
    ///
    /// # Errors
    ///
    /// Returns the API client's error (including a client-side password
    /// mismatch) after emitting a "Registration failed" notification.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn register(&self, form: &RegisterForm) -> Result<RegisteredUser, ApiError> {
        match self.inner.api.register(form).await {
            Ok(user) => {
                self.notify(Notification::info(
                    "Account created!",
                    "Please log in with your credentials",
                ));
                Ok(user)
            }
            Err(err) => {
                self.notify(Notification::destructive(
                    "Registration failed",
                    err.user_message(),
                ));
                Err(err)
            }
        }
    }

    /// Forget the stored tokens and move to `Anonymous`. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` after emitting a "Logout failed" notification
    /// if the session store cannot be cleared. The tokens are still stored
    /// then, so the state is left unchanged.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), SessionError> {
        match self.inner.api.logout() {
            Ok(()) => {
                self.inner.state.send_replace(AuthState::Anonymous);
                self.notify(Notification::info("Logged out", "Come back soon!"));
                Ok(())
            }
            Err(err) => {
                self.notify(Notification::destructive("Logout failed", err.to_string()));
                Err(err)
            }
        }
    }

    fn notify(&self, notification: Notification) {
        self.inner.notifier.notify(notification);
    }
}
