//! Process-wide, compute-once schema registry.
//!
//! Multiple requests may race to build the schema for the same record type on
//! first use. The registry takes a read-mostly lock: the hot path is a shared
//! read, and losers of a first-use race discard their redundant build while
//! exactly one schema is published per type.

use crate::record::ApiRecord;
use crate::spec::RequestSchema;
use crate::SchemaError;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::OnceLock;

static REGISTRY: OnceLock<RwLock<HashMap<TypeId, &'static RequestSchema>>> = OnceLock::new();

fn registry() -> &'static RwLock<HashMap<TypeId, &'static RequestSchema>> {
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Returns the frozen schema for a record type, building it on first use.
///
/// Build failures are configuration errors and are not cached; every call
/// for a misdeclared type re-reports the same [`SchemaError`].
pub fn schema_of<T: ApiRecord>() -> Result<&'static RequestSchema, SchemaError> {
    let id = TypeId::of::<T>();
    if let Some(schema) = registry().read().get(&id).copied() {
        return Ok(schema);
    }

    let built = RequestSchema::build::<T>()?;
    tracing::debug!(record = std::any::type_name::<T>(), "schema built");

    let mut map = registry().write();
    Ok(*map
        .entry(id)
        .or_insert_with(|| Box::leak(Box::new(built))))
}
