//! Schema-driven encoder
//!
//! The inverse of the [decoder](crate::decoder): writes a [`Record`] back to its
//! little-endian wire layout. Used to build capture fixtures and to re-emit
//! packets after filtering; the decoder never depends on it.

use crate::packets::{Header, PacketPayload};
use crate::schema::{WireRecord, schema_for};
use crate::types::{FieldKind, Record, Schema, Value};
use crate::{Result, TelemetryError};

/// Growable little-endian byte sink.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buffer: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { buffer: Vec::with_capacity(capacity) }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Write a primitive or boolean value.
    ///
    /// Records and arrays need a schema and go through [`encode`].
    pub fn write_value(&mut self, value: &Value) {
        match value {
            Value::UInt8(v) => self.buffer.push(*v),
            Value::Int8(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            Value::UInt16(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            Value::Int16(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            Value::UInt32(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            Value::Int32(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            Value::UInt64(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            Value::Int64(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            Value::Float32(v) => self.buffer.extend_from_slice(&v.to_le_bytes()),
            Value::Bool(v) => self.buffer.push(u8::from(*v)),
            Value::Record(_) | Value::Array(_) => {}
        }
    }
}

/// Encode `record` following `schema`.
///
/// Every schema field must be present in the record with a value of the
/// declared kind; extra record fields are ignored. Nothing is guaranteed about
/// the writer's contents after an error.
pub fn encode(schema: &Schema, record: &Record, writer: &mut ByteWriter) -> Result<()> {
    for field in schema.fields() {
        let value = record
            .get(field.name)
            .ok_or_else(|| TelemetryError::encode(field.name, "missing from record"))?;

        encode_field(field.name, &field.kind, value, writer)?;
    }
    Ok(())
}

fn encode_field(
    name: &str,
    kind: &FieldKind,
    value: &Value,
    writer: &mut ByteWriter,
) -> Result<()> {
    match (kind, value) {
        (FieldKind::Primitive(primitive), _) if value.primitive() == Some(*primitive) => {
            writer.write_value(value);
            Ok(())
        }
        (FieldKind::Boolean, Value::Bool(_)) => {
            writer.write_value(value);
            Ok(())
        }
        (FieldKind::Nested(nested), Value::Record(inner)) => {
            let schema = nested.schema()?;
            encode(&schema, inner, writer).map_err(|e| nest(e, name))
        }
        (FieldKind::FixedArray(element, len), Value::Array(items)) => {
            if items.len() != *len {
                return Err(TelemetryError::encode(
                    name,
                    format!("expected {len} elements, got {}", items.len()),
                ));
            }
            let schema = element.schema()?;
            for (index, item) in items.iter().enumerate() {
                encode(&schema, item, writer).map_err(|e| nest(e, &format!("{name}[{index}]")))?;
            }
            Ok(())
        }
        _ => Err(TelemetryError::encode(
            name,
            format!("expected {kind}, got {}", value.type_name()),
        )),
    }
}

fn nest(error: TelemetryError, prefix: &str) -> TelemetryError {
    match error {
        TelemetryError::Encode { field, details } => {
            TelemetryError::Encode { field: format!("{prefix}.{field}"), details }
        }
        other => other,
    }
}

/// Encode a typed record.
pub fn encode_record<R: WireRecord>(value: &R) -> Result<Vec<u8>> {
    let schema = schema_for::<R>()?;
    let mut writer = ByteWriter::with_capacity(schema.wire_size()?);
    encode(&schema, &value.to_record(), &mut writer)?;
    Ok(writer.into_bytes())
}

/// Encode a full datagram: the packet's header followed by its payload.
///
/// The header's packet id is forced to the payload's id.
pub fn encode_packet<P: PacketPayload>(packet: &P) -> Result<Vec<u8>> {
    let mut header = packet.header().clone();
    header.packet_id = P::PACKET_ID.raw();

    let header_schema = schema_for::<Header>()?;
    let payload_schema = schema_for::<P>()?;
    let mut writer =
        ByteWriter::with_capacity(header_schema.wire_size()? + payload_schema.wire_size()?);

    encode(&header_schema, &header.to_record(), &mut writer)?;
    encode(&payload_schema, &packet.to_record(), &mut writer)?;
    Ok(writer.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{decode, decode_bytes};
    use crate::types::ByteCursor;
    use crate::wire_record;

    wire_record! {
        pub struct Corner {
            #[wire = "0"]
            pub id: u8,
            #[wire = "1"]
            pub apex_speed: f32,
        }
    }

    wire_record! {
        pub struct Lap {
            #[wire = "1"]
            pub corners: [Corner; 2],
            #[wire = "0"]
            pub valid: bool,
            #[wire = "2"]
            pub time_ms: u32,
        }
    }

    fn lap() -> Lap {
        Lap {
            corners: [Corner { id: 1, apex_speed: 92.5 }, Corner { id: 2, apex_speed: 140.0 }],
            valid: true,
            time_ms: 84_312,
        }
    }

    #[test]
    fn writes_ordinal_order_little_endian() {
        let bytes = encode_record(&lap()).unwrap();
        let mut expected = vec![1u8, 1];
        expected.extend_from_slice(&92.5f32.to_le_bytes());
        expected.push(2);
        expected.extend_from_slice(&140.0f32.to_le_bytes());
        expected.extend_from_slice(&84_312u32.to_le_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn decoder_reads_back_encoded_bytes() {
        let bytes = encode_record(&lap()).unwrap();
        assert_eq!(decode_bytes::<Lap>(&bytes).unwrap(), lap());
    }

    #[test]
    fn missing_field_is_rejected() {
        let schema = schema_for::<Lap>().unwrap();
        let mut record = lap().to_record();
        record.remove("time_ms");

        let err = encode(&schema, &record, &mut ByteWriter::new()).unwrap_err();
        assert!(matches!(err, TelemetryError::Encode { ref field, .. } if field == "time_ms"));
    }

    #[test]
    fn mismatched_kind_is_rejected() {
        let schema = schema_for::<Corner>().unwrap();
        let mut record = Record::new("Corner");
        record.push("id", Value::UInt16(1));
        record.push("apex_speed", Value::Float32(1.0));

        let err = encode(&schema, &record, &mut ByteWriter::new()).unwrap_err();
        match err {
            TelemetryError::Encode { field, details } => {
                assert_eq!(field, "id");
                assert_eq!(details, "expected u8, got u16");
            }
            other => panic!("expected Encode error, got {other:?}"),
        }
    }

    #[test]
    fn array_length_is_checked() {
        let schema = schema_for::<Lap>().unwrap();
        let original = lap().to_record();
        let mut record = Record::new("Lap");
        record.push("valid", Value::Bool(true));
        record.push("corners", Value::Array(vec![lap().corners[0].to_record()]));
        record.push("time_ms", original.get("time_ms").cloned().unwrap());

        let err = encode(&schema, &record, &mut ByteWriter::new()).unwrap_err();
        assert!(matches!(err, TelemetryError::Encode { ref field, .. } if field == "corners"));
    }

    #[test]
    fn nested_errors_carry_path() {
        let schema = schema_for::<Lap>().unwrap();
        let mut record = lap().to_record();
        let mut broken = Record::new("Corner");
        broken.push("id", Value::UInt8(9));
        record.remove("corners");
        record.push("corners", Value::Array(vec![lap().corners[0].to_record(), broken]));

        let err = encode(&schema, &record, &mut ByteWriter::new()).unwrap_err();
        assert!(matches!(
            err,
            TelemetryError::Encode { ref field, .. } if field == "corners[1].apex_speed"
        ));
    }

    #[test]
    fn dynamic_record_round_trip() {
        let schema = schema_for::<Lap>().unwrap();
        let bytes = encode_record(&lap()).unwrap();
        let record = decode(&schema, &mut ByteCursor::new(&bytes)).unwrap();

        let mut writer = ByteWriter::new();
        encode(&schema, &record, &mut writer).unwrap();
        assert_eq!(writer.as_bytes(), bytes.as_slice());
    }
}
