//! Core types for schema-driven packet decoding.
//!
//! This module provides the building blocks the decoder works with: the byte
//! cursor, field kinds, schemas, and the dynamic values decoded records hold.
//!
//! ## Architecture
//!
//! - [`ByteCursor`] reads little-endian primitives forward-only from one buffer
//! - [`FieldKind`] is the closed set of kinds the decoder dispatches on
//! - [`Schema`] is the ordinal-ordered list of [`FieldDescriptor`]s for a record type
//! - [`Record`] and [`Value`] hold decoded data, addressable by field name
//! - [`WireType`] maps Rust field types to kinds and typed values
//!
//! ## Usage Example
//!
//! ```rust
//! use slipstream::types::{ByteCursor, FieldDecl, FieldKind, Primitive, Schema};
//! use slipstream::decoder::decode;
//!
//! let schema = Schema::from_declarations(
//!     "Sample",
//!     vec![
//!         FieldDecl { name: "speed", ordinal: Some("1"), kind: FieldKind::Primitive(Primitive::F32) },
//!         FieldDecl { name: "gear", ordinal: Some("0"), kind: FieldKind::Primitive(Primitive::I8) },
//!     ],
//! )
//! .unwrap();
//!
//! // gear (i8) comes first on the wire, then speed (f32)
//! let mut data = vec![0x03];
//! data.extend_from_slice(&88.5f32.to_le_bytes());
//!
//! let record = decode(&schema, &mut ByteCursor::new(&data)).unwrap();
//! assert_eq!(record.i8("gear"), Some(3));
//! assert_eq!(record.f32("speed"), Some(88.5));
//! ```

mod cursor;
mod field_kind;
mod schema;
mod value;
mod wire_type;

// Re-export all public types
pub use cursor::ByteCursor;
pub use field_kind::{FieldKind, Primitive, RecordRef};
pub use schema::{FieldDecl, FieldDescriptor, Schema};
pub use value::{Record, Value};
pub use wire_type::WireType;
