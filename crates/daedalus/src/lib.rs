//! # Daedalus
//!
//! **Declarative request validation and handler code generation.**
//!
//! Daedalus has two halves:
//!
//! - a runtime engine that fills a typed record from the named string
//!   parameters of a request, enforcing per-field constraints declared as
//!   small annotation strings (`required,enum=user|moderator|admin,default=user`);
//! - an offline generator (`daedalus-codegen`) that scans annotated service
//!   methods and emits the dispatch glue calling that engine.
//!
//! ## Quick start
//!
//! ```rust
//! use daedalus::prelude::*;
//!
//! #[derive(Debug, Default)]
//! struct ProfileParams {
//!     login: String,
//! }
//!
//! impl ApiRecord for ProfileParams {
//!     fn fields() -> &'static [FieldDecl] {
//!         const FIELDS: &[FieldDecl] = &[FieldDecl::new("Login", FieldKind::Str, "required")];
//!         FIELDS
//!     }
//!
//!     fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
//!         match name {
//!             "Login" => Some(FieldMut::Str(&mut self.login)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let bag = ParameterBag::from_query("login=i0").unwrap();
//! let params: ProfileParams = decode(&bag).unwrap();
//! assert_eq!(params.login, "i0");
//! ```
//!
//! Service methods opt into dispatch with a route annotation the generator
//! scans for:
//!
//! ```rust,ignore
//! impl UserApi {
//!     /// apigen:api {"url": "/user/profile", "auth": false}
//!     pub fn profile(&self, ctx: &RequestContext, params: ProfileParams) -> ApiResult<User> {
//!         // business logic
//!     }
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/daedalus/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use daedalus_core as core;

// Re-export schema types
pub use daedalus_schema as schema;

// Re-export the decode engine
pub use daedalus_decode as decode;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use daedalus::prelude::*;
/// ```
pub mod prelude {
    pub use daedalus_core::{
        write_error, write_json, ApiError, ApiRequest, ApiResponse, ApiResult, RequestContext,
    };

    pub use daedalus_schema::{schema_of, ApiRecord, FieldDecl, FieldKind, FieldMut};

    pub use daedalus_decode::{decode, ParameterBag};
}
