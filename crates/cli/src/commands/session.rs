//! Session commands: login, register, logout, status.

use marketplace_client::{AuthState, RegisterForm, SessionStore};
use secrecy::SecretString;
use serde_json::json;

use super::{CommandError, Context, print_json};

pub async fn login(ctx: &Context, username: &str, password: String) -> Result<(), CommandError> {
    ctx.auth
        .login(username, SecretString::from(password))
        .await?;
    print_json(&json!({ "authenticated": true, "username": username }))
}

pub async fn register(
    ctx: &Context,
    username: String,
    email: String,
    password: String,
    password2: String,
) -> Result<(), CommandError> {
    let form = RegisterForm::new(username, email, password, password2);
    let user = ctx.auth.register(&form).await?;
    print_json(&user)
}

pub fn logout(ctx: &Context) -> Result<(), CommandError> {
    ctx.auth.logout()?;
    print_json(&json!({ "authenticated": false }))
}

/// Report the locally known state. The token is not checked against the server.
pub fn status(ctx: &Context) -> Result<(), CommandError> {
    let has_refresh = ctx.api.session().refresh_token()?.is_some();
    print_json(&json!({
        "authenticated": ctx.auth.state() == AuthState::Authenticated,
        "has_refresh_token": has_refresh,
        "base_url": ctx.api.base_url(),
    }))
}
