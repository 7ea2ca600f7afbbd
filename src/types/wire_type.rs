//! Mapping between Rust field types and wire field kinds

use super::{FieldKind, Primitive, RecordRef, Value};
use crate::schema::WireRecord;
use crate::{Result, TelemetryError};

/// Trait for Rust types that can appear as fields of a wire record.
///
/// The kind drives decoding; `from_value`/`to_value` move between the dynamic
/// [`Value`] produced by the decoder and the typed field.
pub trait WireType: Sized {
    /// Wire kind of this type.
    fn kind() -> FieldKind;

    /// Convert a decoded value into this type.
    fn from_value(value: Value) -> Result<Self>;

    /// Convert this type into a value for encoding.
    fn to_value(&self) -> Value;
}

macro_rules! primitive_wire_type {
    ($($ty:ty => $variant:ident, $primitive:ident;)*) => {
        $(
            impl WireType for $ty {
                fn kind() -> FieldKind {
                    FieldKind::Primitive(Primitive::$primitive)
                }

                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(TelemetryError::TypeConversion {
                            details: format!(
                                "Expected {}, got {}",
                                stringify!($variant),
                                other.type_name()
                            ),
                        }),
                    }
                }

                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }
            }
        )*
    };
}

primitive_wire_type! {
    u8 => UInt8, U8;
    i8 => Int8, I8;
    u16 => UInt16, U16;
    i16 => Int16, I16;
    u32 => UInt32, U32;
    i32 => Int32, I32;
    u64 => UInt64, U64;
    i64 => Int64, I64;
    f32 => Float32, F32;
}

impl WireType for bool {
    fn kind() -> FieldKind {
        FieldKind::Boolean
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(TelemetryError::TypeConversion {
                details: format!("Expected Bool, got {}", other.type_name()),
            }),
        }
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

// Fixed-size arrays of records. The length comes from the type, never the stream.
impl<T: WireRecord, const N: usize> WireType for [T; N] {
    fn kind() -> FieldKind {
        FieldKind::FixedArray(RecordRef::of::<T>(), N)
    }

    fn from_value(value: Value) -> Result<Self> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(TelemetryError::TypeConversion {
                    details: format!("Expected [{}; {}], got {}", T::NAME, N, other.type_name()),
                });
            }
        };

        let elements = items.into_iter().map(T::from_record).collect::<Result<Vec<T>>>()?;
        <[T; N]>::try_from(elements).map_err(|elements: Vec<T>| TelemetryError::TypeConversion {
            details: format!("Expected {} {} elements, got {}", N, T::NAME, elements.len()),
        })
    }

    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(WireRecord::to_record).collect())
    }
}
