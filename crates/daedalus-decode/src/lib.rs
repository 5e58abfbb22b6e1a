//! Parameter decoding and constraint validation.
//!
//! [`decode`] fills a typed record from a [`ParameterBag`] of named string
//! values, enforcing each field's parsed constraints in declaration order and
//! stopping at the first violation. The engine is pure in its inputs: one
//! record per request, no shared mutable state, safe to run concurrently for
//! independent requests.

pub mod bag;
pub mod engine;

pub use bag::ParameterBag;
pub use engine::decode;
