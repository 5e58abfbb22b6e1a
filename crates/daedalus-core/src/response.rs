//! Response model and envelope-writing helpers.
//!
//! Every failure path in generated handlers funnels through [`write_error`],
//! and every success path through [`write_json`], so the wire format is
//! decided in exactly one place.

use crate::error::{ApiError, ErrorEnvelope};
use bytes::Bytes;
use http::StatusCode;
use serde::Serialize;

/// A single HTTP response produced by generated dispatch code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    status: StatusCode,
    body: Bytes,
}

impl ApiResponse {
    /// Creates a response from a status and a JSON body.
    #[must_use]
    pub fn new(status: StatusCode, body: Bytes) -> Self {
        Self { status, body }
    }

    /// Returns the response status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the response body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

/// Writes the failure envelope `{"error": "<message>"}` with the error's
/// status code.
#[must_use]
pub fn write_error(err: &ApiError) -> ApiResponse {
    let body = serde_json::to_vec(&ErrorEnvelope::from(err))
        .unwrap_or_else(|_| br#"{"error":"internal error"}"#.to_vec());
    ApiResponse::new(err.status(), Bytes::from(body))
}

/// Serializes `payload` as the response body with the given status.
///
/// A serialization failure is never swallowed: it degrades to a 500 failure
/// envelope.
#[must_use]
pub fn write_json<T: Serialize>(status: StatusCode, payload: &T) -> ApiResponse {
    match serde_json::to_vec(payload) {
        Ok(body) => ApiResponse::new(status, Bytes::from(body)),
        Err(err) => write_error(&ApiError::internal(format!(
            "response serialization failed: {err}"
        ))),
    }
}
