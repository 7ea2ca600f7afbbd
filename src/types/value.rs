//! Decoded values and records

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{Primitive, WireType};
use crate::{Result, TelemetryError};

/// Runtime value of one decoded field.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    UInt8(u8),
    Int8(i8),
    UInt16(u16),
    Int16(i16),
    UInt32(u32),
    Int32(i32),
    UInt64(u64),
    Int64(i64),
    Float32(f32),
    Bool(bool),
    Record(Record),
    Array(Vec<Record>),
}

impl Value {
    /// Short type name used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::UInt8(_) => "u8",
            Value::Int8(_) => "i8",
            Value::UInt16(_) => "u16",
            Value::Int16(_) => "i16",
            Value::UInt32(_) => "u32",
            Value::Int32(_) => "i32",
            Value::UInt64(_) => "u64",
            Value::Int64(_) => "i64",
            Value::Float32(_) => "f32",
            Value::Bool(_) => "bool",
            Value::Record(_) => "record",
            Value::Array(_) => "array",
        }
    }

    /// Wire layout of a numeric value, `None` for booleans, records and arrays.
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            Value::UInt8(_) => Some(Primitive::U8),
            Value::Int8(_) => Some(Primitive::I8),
            Value::UInt16(_) => Some(Primitive::U16),
            Value::Int16(_) => Some(Primitive::I16),
            Value::UInt32(_) => Some(Primitive::U32),
            Value::Int32(_) => Some(Primitive::I32),
            Value::UInt64(_) => Some(Primitive::U64),
            Value::Int64(_) => Some(Primitive::I64),
            Value::Float32(_) => Some(Primitive::F32),
            Value::Bool(_) | Value::Record(_) | Value::Array(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Record]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// A decoded record: field values in wire order, addressable by name.
///
/// Records are the output of the generic decoder and the input of the encoder.
/// They serialize as a map from field name to value, preserving order.
///
/// ```rust
/// use slipstream::types::{Record, Value};
///
/// let mut record = Record::new("Vector3");
/// record.push("x", Value::Float32(1.5));
/// record.push("y", Value::Float32(-2.0));
///
/// assert_eq!(record.f32("x"), Some(1.5));
/// assert_eq!(record.get_as::<f32>("y").unwrap(), -2.0);
/// assert!(record.get("z").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: &'static str,
    fields: Vec<(&'static str, Value)>,
}

impl Record {
    /// Create an empty record of the named type.
    pub fn new(type_name: &'static str) -> Self {
        Self { type_name, fields: Vec::new() }
    }

    pub fn with_capacity(type_name: &'static str, capacity: usize) -> Self {
        Self { type_name, fields: Vec::with_capacity(capacity) }
    }

    /// Name of the record type this record was decoded as.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Append a field value.
    pub fn push(&mut self, name: &'static str, value: Value) {
        self.fields.push((name, value));
    }

    /// Look up a field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(field, _)| *field == name).map(|(_, value)| value)
    }

    /// Typed lookup by name.
    pub fn get_as<T: WireType>(&self, name: &str) -> Result<T> {
        let value = self
            .get(name)
            .cloned()
            .ok_or_else(|| TelemetryError::FieldNotFound { field: name.to_string() })?;
        T::from_value(value).map_err(|e| in_field(e, self.type_name, name))
    }

    /// Remove a field and convert it, consuming the stored value.
    pub fn take<T: WireType>(&mut self, name: &str) -> Result<T> {
        let value = self
            .remove(name)
            .ok_or_else(|| TelemetryError::FieldNotFound { field: name.to_string() })?;
        T::from_value(value).map_err(|e| in_field(e, self.type_name, name))
    }

    /// Remove a field by name, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.fields.iter().position(|(field, _)| *field == name)?;
        Some(self.fields.remove(index).1)
    }

    /// Iterate over `(name, value)` pairs in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    /// Field names in stored order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convenience typed helpers
    pub fn f32(&self, name: &str) -> Option<f32> {
        self.get_as(name).ok()
    }
    pub fn u8(&self, name: &str) -> Option<u8> {
        self.get_as(name).ok()
    }
    pub fn i8(&self, name: &str) -> Option<i8> {
        self.get_as(name).ok()
    }
    pub fn u16(&self, name: &str) -> Option<u16> {
        self.get_as(name).ok()
    }
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get_as(name).ok()
    }
    pub fn record(&self, name: &str) -> Option<&Record> {
        self.get(name).and_then(Value::as_record)
    }
    pub fn array(&self, name: &str) -> Option<&[Record]> {
        self.get(name).and_then(Value::as_array)
    }
}

fn in_field(error: TelemetryError, type_name: &str, field: &str) -> TelemetryError {
    match error {
        TelemetryError::TypeConversion { details } => TelemetryError::TypeConversion {
            details: format!("{type_name}.{field}: {details}"),
        },
        other => other,
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        let mut zone = Record::new("MarshalZone");
        zone.push("zone_start", Value::Float32(0.25));
        zone.push("zone_flag", Value::Int8(-1));

        let mut record = Record::new("SessionPacket");
        record.push("weather", Value::UInt8(3));
        record.push("game_paused", Value::Bool(false));
        record.push("marshal_zones", Value::Array(vec![zone]));
        record
    }

    #[test]
    fn lookups_by_name() {
        let record = sample();
        assert_eq!(record.type_name(), "SessionPacket");
        assert_eq!(record.len(), 3);
        assert_eq!(record.u8("weather"), Some(3));
        assert_eq!(record.bool("game_paused"), Some(false));
        assert_eq!(record.u8("missing"), None);

        let zones = record.array("marshal_zones").unwrap();
        assert_eq!(zones[0].i8("zone_flag"), Some(-1));
        assert_eq!(record.names().collect::<Vec<_>>(), ["weather", "game_paused", "marshal_zones"]);
    }

    #[test]
    fn type_mismatch_names_the_field() {
        let record = sample();
        let err = record.get_as::<u16>("weather").unwrap_err();
        match err {
            TelemetryError::TypeConversion { details } => {
                assert!(details.contains("SessionPacket.weather"), "{details}");
            }
            other => panic!("expected TypeConversion, got {other:?}"),
        }

        assert!(matches!(
            record.get_as::<u8>("nope"),
            Err(TelemetryError::FieldNotFound { ref field }) if field == "nope"
        ));
    }

    #[test]
    fn take_consumes_the_field() {
        let mut record = sample();
        assert_eq!(record.take::<u8>("weather").unwrap(), 3);
        assert!(record.get("weather").is_none());
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn serializes_as_ordered_map() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"weather":3,"game_paused":false,"marshal_zones":[{"zone_start":0.25,"zone_flag":-1}]}"#
        );
    }
}
