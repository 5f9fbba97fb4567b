//! Client error types and error-body normalization.
//!
//! Every failed backend response is reduced to one human-readable message by
//! [`normalize_error_message`]. That message is the only error detail callers
//! see; per-field structure in the body is discarded.

use serde_json::Value;
use thiserror::Error;

use crate::session::SessionError;

/// Errors surfaced by [`crate::ApiClient`] operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request failed before a response arrived.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    ///
    /// `Display` is the normalized message alone.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The backend answered with success but the body did not match the
    /// expected schema.
    #[error("Unexpected response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Rejected client-side before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The session store could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    /// HTTP status of an `Api` error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the backend rejected the stored credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Client-side validation failures, raised before any network traffic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Registration password and its confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// A slug contained characters outside `[A-Za-z0-9_-]`.
    #[error("Invalid slug: {0}")]
    InvalidSlug(String),
}

/// Reduce a failed response body to a single message.
///
/// Preference order:
/// 1. a non-empty string `detail` field,
/// 2. every value of the body joined by a single space, in key order, with
///    one level of array flattening (a top-level array is joined the same way),
/// 3. `Request failed with status <status>` when the body is not JSON or the
///    steps above produce an empty string.
#[must_use]
pub fn normalize_error_message(status: u16, body: &str) -> String {
    let message = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
            _ => join_flattened(map.values()),
        },
        Ok(Value::Array(items)) => join_flattened(items.iter()),
        Ok(Value::String(text)) => text,
        Ok(_) | Err(_) => String::new(),
    };

    if message.is_empty() {
        format!("Request failed with status {status}")
    } else {
        message
    }
}

fn join_flattened<'a>(values: impl Iterator<Item = &'a Value>) -> String {
    values
        .flat_map(|value| match value {
            Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>(),
            other => vec![scalar_text(other)],
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_field_wins() {
        let message = normalize_error_message(401, r#"{"detail":"Invalid credentials"}"#);
        assert_eq!(message, "Invalid credentials");
    }

    #[test]
    fn test_detail_preferred_over_other_fields() {
        let body = r#"{"code":"token_not_valid","detail":"Token is invalid or expired"}"#;
        assert_eq!(
            normalize_error_message(401, body),
            "Token is invalid or expired"
        );
    }

    #[test]
    fn test_field_errors_joined_in_key_order() {
        let body = r#"{"password":["Too short"],"email":["Invalid"]}"#;
        assert_eq!(normalize_error_message(400, body), "Too short Invalid");
    }

    #[test]
    fn test_multiple_messages_per_field_are_flattened() {
        let body = r#"{"username":["Required.","Too long."],"non_field_errors":["Nope"]}"#;
        assert_eq!(
            normalize_error_message(400, body),
            "Required. Too long. Nope"
        );
    }

    #[test]
    fn test_top_level_array_body() {
        assert_eq!(
            normalize_error_message(400, r#"["Cart is empty"]"#),
            "Cart is empty"
        );
    }

    #[test]
    fn test_empty_detail_falls_back_to_fields() {
        let body = r#"{"detail":"","quantity":["Must be positive"]}"#;
        assert_eq!(normalize_error_message(400, body), " Must be positive");
    }

    #[test]
    fn test_non_json_body() {
        assert_eq!(
            normalize_error_message(502, "<html>Bad Gateway</html>"),
            "Request failed with status 502"
        );
    }

    #[test]
    fn test_empty_object_body() {
        assert_eq!(
            normalize_error_message(404, "{}"),
            "Request failed with status 404"
        );
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(
            normalize_error_message(500, ""),
            "Request failed with status 500"
        );
    }

    #[test]
    fn test_api_error_display_is_message() {
        let err = ApiError::Api {
            status: 400,
            message: "Too short Invalid".to_string(),
        };
        assert_eq!(err.to_string(), "Too short Invalid");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_validation_error_message() {
        let err = ApiError::from(ValidationError::PasswordMismatch);
        assert_eq!(err.user_message(), "Passwords do not match");
        assert_eq!(err.status(), None);
    }
}
