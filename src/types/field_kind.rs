//! Wire field kinds

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use super::Schema;
use crate::Result;
use crate::schema::WireRecord;

/// Fixed-width scalar layout on the wire.
///
/// Not every combination of flags is a valid wire type: integers may be 1, 2, 4
/// or 8 bytes wide and floats must be 4 bytes (IEEE-754 single precision).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Primitive {
    /// Width in bytes
    pub width: u8,
    /// Two's-complement signed integer
    pub signed: bool,
    /// IEEE-754 float
    pub float: bool,
}

impl Primitive {
    pub const U8: Primitive = Primitive::int(1, false);
    pub const I8: Primitive = Primitive::int(1, true);
    pub const U16: Primitive = Primitive::int(2, false);
    pub const I16: Primitive = Primitive::int(2, true);
    pub const U32: Primitive = Primitive::int(4, false);
    pub const I32: Primitive = Primitive::int(4, true);
    pub const U64: Primitive = Primitive::int(8, false);
    pub const I64: Primitive = Primitive::int(8, true);
    pub const F32: Primitive = Primitive { width: 4, signed: true, float: true };

    const fn int(width: u8, signed: bool) -> Self {
        Self { width, signed, float: false }
    }

    /// Whether the decoder can read this layout.
    pub const fn is_supported(&self) -> bool {
        if self.float {
            self.width == 4
        } else {
            matches!(self.width, 1 | 2 | 4 | 8)
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match (self.float, self.signed) {
            (true, _) => 'f',
            (false, true) => 'i',
            (false, false) => 'u',
        };
        write!(f, "{}{}", prefix, u32::from(self.width) * 8)
    }
}

/// Reference to another record type's schema, used by nested and array fields.
#[derive(Clone, Copy)]
pub struct RecordRef {
    name: &'static str,
    type_id: fn() -> TypeId,
    schema: fn() -> Result<Arc<Schema>>,
}

impl RecordRef {
    /// Reference the schema of record type `R`.
    pub fn of<R: WireRecord>() -> Self {
        Self { name: R::NAME, type_id: TypeId::of::<R>, schema: crate::schema::schema_for::<R> }
    }

    /// Name of the referenced record type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type identity of the referenced record.
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Resolve the referenced schema through the registry.
    pub fn schema(&self) -> Result<Arc<Schema>> {
        (self.schema)()
    }
}

impl fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordRef").field(&self.name).finish()
    }
}

impl PartialEq for RecordRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id() == other.type_id()
    }
}

impl Eq for RecordRef {}

/// Closed set of field kinds the decoder dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Numeric scalar, one cursor read
    Primitive(Primitive),
    /// Single byte restricted to 0 or 1
    Boolean,
    /// Embedded record decoded with its own schema
    Nested(RecordRef),
    /// Exactly `N` consecutive records; `N` is part of the type, never read from the stream
    FixedArray(RecordRef, usize),
}

impl FieldKind {
    /// Whether this kind can be decoded. Nested kinds are checked when their own
    /// schema is built.
    pub fn is_supported(&self) -> bool {
        match self {
            FieldKind::Primitive(primitive) => primitive.is_supported(),
            FieldKind::Boolean | FieldKind::Nested(_) | FieldKind::FixedArray(..) => true,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Primitive(primitive) => {
                if primitive.is_supported() {
                    write!(f, "{primitive}")
                } else {
                    write!(
                        f,
                        "primitive(width={}, signed={}, float={})",
                        primitive.width, primitive.signed, primitive.float
                    )
                }
            }
            FieldKind::Boolean => f.write_str("bool"),
            FieldKind::Nested(record) => f.write_str(record.name()),
            FieldKind::FixedArray(record, len) => write!(f, "[{}; {}]", record.name(), len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_support_matrix() {
        for primitive in [
            Primitive::U8,
            Primitive::I8,
            Primitive::U16,
            Primitive::I16,
            Primitive::U32,
            Primitive::I32,
            Primitive::U64,
            Primitive::I64,
            Primitive::F32,
        ] {
            assert!(primitive.is_supported(), "{primitive} should be supported");
        }

        assert!(!Primitive { width: 3, signed: false, float: false }.is_supported());
        assert!(!Primitive { width: 8, signed: true, float: true }.is_supported());
        assert!(!Primitive { width: 2, signed: true, float: true }.is_supported());
    }

    #[test]
    fn kind_display_names() {
        assert_eq!(FieldKind::Primitive(Primitive::U16).to_string(), "u16");
        assert_eq!(FieldKind::Primitive(Primitive::I8).to_string(), "i8");
        assert_eq!(FieldKind::Primitive(Primitive::F32).to_string(), "f32");
        assert_eq!(FieldKind::Boolean.to_string(), "bool");
        assert_eq!(
            FieldKind::Primitive(Primitive { width: 3, signed: false, float: false }).to_string(),
            "primitive(width=3, signed=false, float=false)"
        );
    }
}
