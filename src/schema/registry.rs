//! Process-wide schema registry
//!
//! Schemas are derived from a record type's declarations the first time they are
//! needed and cached for the life of the process. Each record type owns its own
//! `OnceLock`, so the only synchronisation is the one-time initialisation of that
//! type; concurrent first callers block until the single derivation finishes and
//! then all see the same `Arc<Schema>`. Later reads are lock-free.
//!
//! Schema errors are cached too: a misdeclared type reports the same
//! [`SchemaError`](crate::SchemaError) on every call.

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::WireRecord;
use crate::catalog;
use crate::packets::Header;
use crate::types::Schema;
use crate::{Result, SchemaError};

/// Get the cached schema for record type `R`, deriving it on first use.
pub fn schema_for<R: WireRecord>() -> Result<Arc<Schema>> {
    let slot = R::schema_cell().get_or_init(|| build_schema::<R>().map(Arc::new));
    Ok(slot.clone()?)
}

/// Derive the schema for `R` without consulting or populating the cache.
pub fn build_schema<R: WireRecord>() -> std::result::Result<Schema, SchemaError> {
    let result = Schema::from_declarations(R::NAME, R::declare());
    match &result {
        Ok(schema) => {
            debug!(record = R::NAME, fields = schema.len(), "Derived wire schema");
        }
        Err(e) => {
            warn!(record = R::NAME, error = %e, "Wire schema derivation failed");
        }
    }
    result
}

/// Eagerly derive the header schema and every registered payload schema.
///
/// Calling this once at startup moves all schema derivation (and any schema
/// error) ahead of the first decode. Nested record schemas are populated through
/// the payloads' wire sizes.
pub fn preload() -> Result<()> {
    let header = schema_for::<Header>()?;
    let mut total = header.wire_size()?;

    for entry in catalog::registered_payloads() {
        let schema = entry.schema()?;
        let size = schema.wire_size()?;
        debug!(payload = entry.name, bytes = size, "Preloaded payload schema");
        total += size;
    }

    info!(
        payloads = catalog::registered_payloads().count(),
        schema_bytes = total,
        "Schema registry preloaded"
    );
    Ok(())
}
