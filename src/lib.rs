//! Schema-driven decoder for F1 2020 UDP telemetry packets.
//!
//! Slipstream decodes fixed-layout, little-endian telemetry datagrams with one
//! generic engine instead of hand-written per-packet parsers. Each record type
//! declares its fields once, with a wire ordinal per field; the engine derives a
//! schema from that declaration, caches it for the life of the process, and
//! walks it to read any packet the catalog knows about.
//!
//! # Features
//!
//! - **Generic decoding**: one recursive decoder for primitives, booleans,
//!   nested records and fixed-size arrays of records
//! - **Declared layouts**: [`wire_record!`] structs are the single source of
//!   truth for wire order
//! - **Lock-free schema cache**: per-type one-time initialisation, plus
//!   [`schema::preload`] for eager startup
//! - **Precise errors**: wire failures name the field path and byte offset
//! - **Batch conversion**: async conversion of captured buffers to JSON
//!
//! # Quick Start
//!
//! ```rust
//! use slipstream::catalog::{Classified, classify_and_decode};
//! use slipstream::encoder::encode_packet;
//! use slipstream::packets::SessionPacket;
//!
//! # fn main() -> slipstream::Result<()> {
//! let mut session = SessionPacket::default();
//! session.header.packet_format = 2020;
//! session.air_temperature = 24;
//! let datagram = encode_packet(&session)?;
//!
//! match classify_and_decode(&datagram)? {
//!     Classified::Decoded(packet) => {
//!         assert_eq!(packet.name, "session");
//!         assert_eq!(packet.payload.i8("air_temperature"), Some(24));
//!     }
//!     Classified::Unsupported { header } => {
//!         println!("no decoder for packet id {}", header.packet_id);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Core types and error handling
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Decoding engine
pub mod catalog;
pub mod decoder;
pub mod encoder;
pub mod packets;
pub mod schema;

// Batch conversion
pub mod convert;
pub mod source;

// Core exports
pub use error::*;
pub use types::*;

pub use catalog::{Classified, DecodedPacket, classify_and_decode, decode_packet};
pub use packets::{Header, PacketId, TelemetryPacket};
pub use schema::{WireRecord, preload, schema_for};
