//! Request-time error types.
//!
//! [`ApiError`] is the only error shape surfaced to request-time callers: a
//! status code plus a human-readable message, enough to both log the failure
//! and render the wire envelope.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;

/// Error carried from validation, dispatch, and business methods to the
/// response writer.
///
/// Business methods return `Result<T, ApiError>` directly, so the status a
/// method declares is the status the client sees; there is no dynamic
/// downcasting to recover it.
///
/// # Example
///
/// ```
/// use daedalus_core::ApiError;
/// use http::StatusCode;
///
/// let err = ApiError::bad_request("login must not be empty");
/// assert_eq!(err.status(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.message(), "login must not be empty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit status code.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 validation error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 403 error for a failed auth header check.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    /// Creates a 404 error for a path matching no declared route.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 406 error for a verb the route does not accept.
    #[must_use]
    pub fn not_acceptable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_ACCEPTABLE, message)
    }

    /// Creates a 500 error for configuration and serialization failures.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Wire-format failure envelope: `{"error": "<message>"}`.
///
/// Success responses use per-method envelope types emitted by the generator;
/// the failure shape is shared and lives here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The failure message, never empty on an error response.
    pub error: String,
}

impl From<&ApiError> for ErrorEnvelope {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_map_to_expected_statuses() {
        assert_eq!(
            ApiError::bad_request("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::forbidden("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::not_acceptable("x").status(),
            StatusCode::NOT_ACCEPTABLE
        );
        assert_eq!(
            ApiError::internal("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_is_the_message() {
        let err = ApiError::bad_request("age must be int");
        assert_eq!(err.to_string(), "age must be int");
    }

    #[test]
    fn test_envelope_serialization() {
        let err = ApiError::not_found("unknown method");
        let envelope = ErrorEnvelope::from(&err);
        let json = serde_json::to_string(&envelope).expect("envelope serializes");
        assert_eq!(json, r#"{"error":"unknown method"}"#);
    }
}
