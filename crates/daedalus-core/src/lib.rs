//! Core types for the Daedalus API toolkit.
//!
//! This crate defines the request/response model that generated dispatch code
//! runs against, the [`ApiError`] type every failure path surfaces through,
//! and the envelope-writing helpers shared by all generated handlers.
//!
//! The transport layer (listening, routing registration) is an external
//! collaborator: callers construct an [`ApiRequest`] however they like, hand
//! it to a generated `dispatch` function, and write the returned
//! [`ApiResponse`] back out.

pub mod error;
pub mod request;
pub mod response;

pub use error::{ApiError, ApiResult, ErrorEnvelope};
pub use request::{ApiRequest, ApiRequestBuilder, RequestContext};
pub use response::{write_error, write_json, ApiResponse};
