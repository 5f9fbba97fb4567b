//! Login, registration, and logout.
//!
//! `login` is the only operation that writes the session store; `logout` is
//! purely local and never touches the network.

use marketplace_core::UserId;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument};

use super::{ApiClient, ApiRequest};
use crate::error::{ApiError, ValidationError};
use crate::session::{SessionError, TokenPair};

/// Username/password pair for `POST /login/`.
#[derive(Debug)]
pub struct LoginCredentials {
    pub username: String,
    pub password: SecretString,
}

impl LoginCredentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Account details for `POST /register/`.
#[derive(Debug)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: SecretString,
    /// Confirmation; must equal `password` or the request is never sent.
    pub password2: SecretString,
}

impl RegisterForm {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        password2: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
            password2: SecretString::from(password2.into()),
        }
    }

    /// Whether the confirmation matches.
    #[must_use]
    pub fn passwords_match(&self) -> bool {
        self.password.expose_secret() == self.password2.expose_secret()
    }
}

/// Account echoed back by `POST /register/`.
///
/// Registration does not log the user in; the reply is informational and
/// every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Wire shape of the login reply.
#[derive(Deserialize)]
struct TokenResponse {
    access: String,
    refresh: String,
}

impl ApiClient {
    /// Exchange credentials for a token pair and persist it.
    ///
    /// The pair is saved to the session store before this returns.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with the backend's message if the credentials
    /// are rejected, or `ApiError::Session` if the pair cannot be stored.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<TokenPair, ApiError> {
        let body = json!({
            "username": credentials.username,
            "password": credentials.password.expose_secret(),
        });

        let reply: TokenResponse = self.request(ApiRequest::post("/login/", body)).await?;
        let tokens = TokenPair::new(reply.access, reply.refresh);
        self.inner.session.save(&tokens)?;

        info!("Logged in");
        Ok(tokens)
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` without sending anything if the
    /// passwords differ, or `ApiError::Api` if the backend rejects the form.
    #[instrument(skip(self, form), fields(username = %form.username))]
    pub async fn register(&self, form: &RegisterForm) -> Result<RegisteredUser, ApiError> {
        if !form.passwords_match() {
            return Err(ValidationError::PasswordMismatch.into());
        }

        let body = json!({
            "username": form.username,
            "email": form.email,
            "password": form.password.expose_secret(),
            "password2": form.password2.expose_secret(),
        });

        let user = self.request(ApiRequest::post("/register/", body)).await?;
        info!("Registered account");
        Ok(user)
    }

    /// Forget the stored tokens. No network call is made.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the session store cannot be cleared.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.inner.session.clear()
    }
}
