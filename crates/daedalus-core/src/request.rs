//! Transport-agnostic request model.
//!
//! Generated dispatch code consumes an [`ApiRequest`] rather than any
//! concrete server type, so the same handlers can be driven by a real
//! listener or constructed directly in tests.

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};

/// A single HTTP request, as seen by generated handlers.
///
/// # Example
///
/// ```
/// use daedalus_core::ApiRequest;
/// use http::{Method, Uri};
///
/// let req = ApiRequest::builder()
///     .method(Method::GET)
///     .uri(Uri::from_static("/user/profile?login=i0"))
///     .build();
///
/// assert_eq!(req.path(), "/user/profile");
/// assert_eq!(req.query_string(), Some("login=i0"));
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiRequest {
    /// Creates a request from its parts.
    #[must_use]
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
        }
    }

    /// Returns a builder for constructing a request.
    #[must_use]
    pub fn builder() -> ApiRequestBuilder {
        ApiRequestBuilder::new()
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the path portion of the URI.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Returns the query string if present.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a specific header value as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the request body as bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Builds the ambient context passed to business methods.
    #[must_use]
    pub fn context(&self) -> RequestContext {
        RequestContext {
            method: self.method.clone(),
            path: self.uri.path().to_string(),
        }
    }
}

/// Builder for [`ApiRequest`].
#[derive(Debug, Default)]
pub struct ApiRequestBuilder {
    method: Option<Method>,
    uri: Option<Uri>,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiRequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the URI.
    #[must_use]
    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = Some(uri);
        self
    }

    /// Adds a single header. Values that are not valid header values are
    /// dropped.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = value.parse() {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the request.
    ///
    /// # Panics
    ///
    /// Panics if method or uri were not set.
    #[must_use]
    pub fn build(self) -> ApiRequest {
        ApiRequest {
            method: self.method.expect("method is required"),
            uri: self.uri.expect("uri is required"),
            headers: self.headers,
            body: self.body,
        }
    }
}

/// Ambient per-request value passed as the first argument of every business
/// method.
///
/// Business methods treat it as opaque; it exists so their signatures carry
/// the request provenance without coupling them to [`ApiRequest`] itself.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    path: String,
}

impl RequestContext {
    /// Returns the HTTP method of the originating request.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the path of the originating request.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}
