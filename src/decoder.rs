//! Generic schema-driven decoder
//!
//! Walks a [`Schema`] in ordinal order and reads each field from a
//! [`ByteCursor`], recursing into nested records and fixed-size arrays. There are
//! no variable-length fields, so the bytes consumed always equal the schema's
//! [`wire_size`](Schema::wire_size).
//!
//! Errors carry the path of the field being read when they occurred, e.g.
//! `car_motion[3].world_position.x`. No partial record is returned on failure.

use crate::schema::{WireRecord, schema_for};
use crate::types::{ByteCursor, FieldDescriptor, FieldKind, Primitive, Record, Schema, Value};
use crate::{Result, SchemaError, TelemetryError};

/// Decode one record of `schema` from the cursor.
pub fn decode(schema: &Schema, cursor: &mut ByteCursor<'_>) -> Result<Record> {
    let mut record = Record::with_capacity(schema.record_name(), schema.len());

    for field in schema.fields() {
        let value = decode_field(schema.record_name(), field, cursor)
            .map_err(|e| e.within(field.name))?;
        record.push(field.name, value);
    }

    Ok(record)
}

/// Decode a record of type `R` from the cursor and lift it into `R`.
pub fn decode_as<R: WireRecord>(cursor: &mut ByteCursor<'_>) -> Result<R> {
    let schema = schema_for::<R>()?;
    R::from_record(decode(&schema, cursor)?)
}

/// Decode a record of type `R` from the start of `data`.
///
/// Bytes after the record are ignored.
pub fn decode_bytes<R: WireRecord>(data: &[u8]) -> Result<R> {
    decode_as(&mut ByteCursor::new(data))
}

fn decode_field(
    record: &'static str,
    field: &FieldDescriptor,
    cursor: &mut ByteCursor<'_>,
) -> Result<Value> {
    match field.kind {
        FieldKind::Primitive(primitive) => read_primitive(record, field, primitive, cursor),
        FieldKind::Boolean => Ok(Value::Bool(cursor.read_bool()?)),
        FieldKind::Nested(nested) => {
            let schema = nested.schema()?;
            Ok(Value::Record(decode(&schema, cursor)?))
        }
        FieldKind::FixedArray(element, len) => {
            let schema = element.schema()?;
            let mut items = Vec::with_capacity(len);
            for index in 0..len {
                let item = decode(&schema, cursor).map_err(|e| e.within(&format!("[{index}]")))?;
                items.push(item);
            }
            Ok(Value::Array(items))
        }
    }
}

fn read_primitive(
    record: &'static str,
    field: &FieldDescriptor,
    primitive: Primitive,
    cursor: &mut ByteCursor<'_>,
) -> Result<Value> {
    let value = match (primitive.float, primitive.signed, primitive.width) {
        (false, false, 1) => Value::UInt8(cursor.read_u8()?),
        (false, true, 1) => Value::Int8(cursor.read_i8()?),
        (false, false, 2) => Value::UInt16(cursor.read_u16()?),
        (false, true, 2) => Value::Int16(cursor.read_i16()?),
        (false, false, 4) => Value::UInt32(cursor.read_u32()?),
        (false, true, 4) => Value::Int32(cursor.read_i32()?),
        (false, false, 8) => Value::UInt64(cursor.read_u64()?),
        (false, true, 8) => Value::Int64(cursor.read_i64()?),
        (true, _, 4) => Value::Float32(cursor.read_f32()?),
        _ => {
            return Err(TelemetryError::Schema(SchemaError::UnsupportedFieldKind {
                record,
                field: field.name,
                kind: FieldKind::Primitive(primitive).to_string(),
            }));
        }
    };
    Ok(value)
}
