//! The parameter bag: named, possibly multi-valued string inputs.
//!
//! Multi-valued entries are preserved as supplied. Collapsing them silently
//! would hide a client error, so the engine rejects them instead.

use daedalus_core::ApiError;
use indexmap::IndexMap;

/// Named string parameters supplied with one request.
///
/// # Example
///
/// ```
/// use daedalus_decode::ParameterBag;
///
/// let bag = ParameterBag::from_query("login=i0&age=35").unwrap();
/// assert_eq!(bag.values("login"), Some(&["i0".to_string()][..]));
/// assert_eq!(bag.values("status"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBag {
    values: IndexMap<String, Vec<String>>,
}

impl ParameterBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string. Duplicate names accumulate into one entry.
    ///
    /// An empty string yields an empty bag; absent parameters are a
    /// validation concern, not a parse error.
    pub fn from_query(query: &str) -> Result<Self, ApiError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
            .map_err(|err| ApiError::bad_request(format!("invalid query: {err}")))?;

        let mut bag = Self::new();
        for (name, value) in pairs {
            bag.append(name, value);
        }
        Ok(bag)
    }

    /// Parses a form-urlencoded request body.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let body = std::str::from_utf8(body)
            .map_err(|err| ApiError::bad_request(format!("invalid body: {err}")))?;
        Self::from_query(body)
    }

    /// Appends one value under a name, keeping earlier values.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    /// Returns all values supplied under a name.
    #[must_use]
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.values.get(name).map(Vec::as_slice)
    }

    /// Returns `true` when no parameters were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }
}
