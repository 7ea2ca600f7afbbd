//! Packet type catalog
//!
//! Maps packet ids to payload schemas and drives the two-phase decode of a
//! datagram: the fixed header first, then the payload its packet id selects.
//! The mapping is an explicit table; ids without an entry (including ids the
//! game does not define) classify as [`Classified::Unsupported`], which is a
//! normal outcome rather than an error.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;
use tracing::trace;

use crate::decoder::{decode, decode_as};
use crate::packets::{
    Header, LapDataPacket, MotionPacket, PacketId, PacketPayload, SessionPacket, TelemetryPacket,
};
use crate::schema::{WireRecord, schema_for};
use crate::types::{ByteCursor, Record, Schema};
use crate::{Result, TelemetryError};

/// A registered payload type.
#[derive(Debug, Clone, Copy)]
pub struct PayloadEntry {
    pub id: PacketId,
    /// Logical name, e.g. `"session"`
    pub name: &'static str,
    schema: fn() -> Result<Arc<Schema>>,
    lift: fn(Header, Record) -> Result<TelemetryPacket>,
}

impl PayloadEntry {
    /// Cached payload schema (excludes the header).
    pub fn schema(&self) -> Result<Arc<Schema>> {
        (self.schema)()
    }
}

static PAYLOADS: [PayloadEntry; 3] = [
    PayloadEntry {
        id: PacketId::Motion,
        name: PacketId::Motion.name(),
        schema: schema_for::<MotionPacket>,
        lift: lift_motion,
    },
    PayloadEntry {
        id: PacketId::Session,
        name: PacketId::Session.name(),
        schema: schema_for::<SessionPacket>,
        lift: lift_session,
    },
    PayloadEntry {
        id: PacketId::LapData,
        name: PacketId::LapData.name(),
        schema: schema_for::<LapDataPacket>,
        lift: lift_lap_data,
    },
];

fn lift<P: PacketPayload>(header: Header, record: Record) -> Result<Box<P>> {
    let mut packet = <P as WireRecord>::from_record(record)?;
    packet.set_header(header);
    Ok(Box::new(packet))
}

fn lift_motion(header: Header, record: Record) -> Result<TelemetryPacket> {
    Ok(TelemetryPacket::Motion(lift(header, record)?))
}

fn lift_session(header: Header, record: Record) -> Result<TelemetryPacket> {
    Ok(TelemetryPacket::Session(lift(header, record)?))
}

fn lift_lap_data(header: Header, record: Record) -> Result<TelemetryPacket> {
    Ok(TelemetryPacket::LapData(lift(header, record)?))
}

/// Look up the payload registered for a raw packet id.
pub fn payload_for(packet_id: u8) -> Option<&'static PayloadEntry> {
    PAYLOADS.iter().find(|entry| entry.id.raw() == packet_id)
}

/// Every registered payload, in packet id order.
pub fn registered_payloads() -> impl Iterator<Item = &'static PayloadEntry> {
    PAYLOADS.iter()
}

/// Outcome of classifying one buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Decoded(DecodedPacket),
    /// No payload is registered for the header's packet id. Only the header
    /// bytes were read.
    Unsupported { header: Header },
}

impl Classified {
    pub fn header(&self) -> &Header {
        match self {
            Classified::Decoded(packet) => &packet.header,
            Classified::Unsupported { header } => header,
        }
    }

    /// Logical name of a decoded packet.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Classified::Decoded(packet) => Some(packet.name),
            Classified::Unsupported { .. } => None,
        }
    }

    pub fn into_decoded(self) -> Option<DecodedPacket> {
        match self {
            Classified::Decoded(packet) => Some(packet),
            Classified::Unsupported { .. } => None,
        }
    }
}

/// A decoded header plus payload record.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPacket {
    pub name: &'static str,
    pub packet_id: PacketId,
    pub header: Header,
    pub payload: Record,
    /// Header and payload bytes read; trailing bytes are not counted.
    pub bytes_consumed: usize,
}

impl DecodedPacket {
    /// Lift into the typed packet, with the header embedded.
    pub fn into_typed(self) -> Result<TelemetryPacket> {
        // A DecodedPacket is only built from a registered entry
        match PAYLOADS.iter().find(|entry| entry.id == self.packet_id) {
            Some(entry) => (entry.lift)(self.header, self.payload),
            None => Err(TelemetryError::TypeConversion {
                details: format!("No typed payload for packet {}", self.name),
            }),
        }
    }
}

// `{"header": {...}, <payload fields>...}`
impl Serialize for DecodedPacket {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.payload.len() + 1))?;
        map.serialize_entry("header", &self.header)?;
        for (name, value) in self.payload.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Decode the header of `buffer`, then the payload its packet id selects.
///
/// Bytes after the payload are ignored. The header's count fields and indices
/// are not validated against the payload.
pub fn classify_and_decode(buffer: &[u8]) -> Result<Classified> {
    let mut cursor = ByteCursor::new(buffer);
    let header: Header = decode_as(&mut cursor).map_err(|e| e.within("header"))?;

    let Some(entry) = payload_for(header.packet_id) else {
        trace!(packet_id = header.packet_id, "No payload registered, skipping");
        return Ok(Classified::Unsupported { header });
    };

    let schema = entry.schema()?;
    let payload = decode(&schema, &mut cursor)?;
    trace!(
        packet = entry.name,
        bytes = cursor.position(),
        trailing = cursor.remaining(),
        "Decoded packet"
    );

    Ok(Classified::Decoded(DecodedPacket {
        name: entry.name,
        packet_id: entry.id,
        header,
        payload,
        bytes_consumed: cursor.position(),
    }))
}

/// Decode `buffer` straight into a typed packet, `None` if unsupported.
pub fn decode_packet(buffer: &[u8]) -> Result<Option<TelemetryPacket>> {
    match classify_and_decode(buffer)? {
        Classified::Decoded(packet) => packet.into_typed().map(Some),
        Classified::Unsupported { .. } => Ok(None),
    }
}
