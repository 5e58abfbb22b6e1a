//! Source scanner and dispatch code generator.
//!
//! The generator runs offline, once per invocation, in two pure stages:
//! [`extract::extract_methods`] walks a parsed source tree and collects one
//! [`AnnotatedMethod`] per method carrying an `apigen:api` doc-comment
//! annotation, and [`emit::emit`] turns the collected metadata into the
//! source text of a dispatch module. The stages share no state beyond the
//! metadata itself, so each is testable on its own.

pub mod emit;
pub mod extract;

pub use emit::{emit, EmitError};
pub use extract::{extract_methods, AnnotatedMethod, MARKER};
