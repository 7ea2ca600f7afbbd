//! Schema Derivation & Caching
//!
//! This module turns record type declarations into wire schemas and caches them
//! for the life of the process.
//!
//! # Architecture
//!
//! The schema system follows a layered approach:
//! - Record types declare fields once via [`wire_record!`](crate::wire_record)
//!   (name, Rust type, ordinal annotation)
//! - [`WireRecord`] exposes those declarations plus a per-type cache slot
//! - The registry derives an ordinal-ordered [`Schema`](crate::types::Schema) on
//!   first use and hands out shared `Arc`s afterwards
//! - [`preload`] derives every packet schema at startup

mod record;
mod registry;

pub use record::{SchemaSlot, WireRecord};
pub use registry::{build_schema, preload, schema_for};
