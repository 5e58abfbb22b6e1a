//! Field annotation grammar and request schemas.
//!
//! A request record declares one [`FieldDecl`] per field: the field name, its
//! kind, and a small annotation string such as
//! `required,enum=user|moderator|admin,default=user`. This crate parses those
//! annotations into an ordered [`RequestSchema`] of [`FieldSpec`]s, once per
//! record type, and freezes the result in a process-wide registry.
//!
//! Annotation problems are configuration errors ([`SchemaError`]), fatal to
//! schema construction; they are never reported per request.

pub mod grammar;
pub mod record;
pub mod registry;
pub mod spec;

pub use grammar::{parse_annotation, Constraint, ConstraintKey, SchemaError};
pub use record::{ApiRecord, FieldDecl, FieldKind, FieldMut};
pub use registry::schema_of;
pub use spec::{FieldSpec, RequestSchema};
