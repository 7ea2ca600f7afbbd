//! Record declarations
//!
//! A record type declares its wire layout once: field names, Rust types and
//! ordinal annotations. The [`wire_record!`](crate::wire_record) macro turns that
//! declaration into a struct plus its [`WireRecord`] implementation.

use std::sync::{Arc, OnceLock};

use crate::types::{FieldDecl, Record, Schema};
use crate::{Result, SchemaError};

/// Cached outcome of deriving a record type's schema.
pub type SchemaSlot = std::result::Result<Arc<Schema>, SchemaError>;

/// Trait for record types with a fixed wire layout.
///
/// Implementations are normally generated by [`wire_record!`](crate::wire_record).
/// Hand-written implementations must return a dedicated `static` from
/// [`schema_cell`](WireRecord::schema_cell); sharing a cell between types would
/// hand one type's schema to another.
pub trait WireRecord: Sized + 'static {
    /// Record type name used in schemas, errors and logs.
    const NAME: &'static str;

    /// Field declarations in declaration order.
    fn declare() -> Vec<FieldDecl>;

    /// Per-type, process-wide schema cache.
    fn schema_cell() -> &'static OnceLock<SchemaSlot>;

    /// Lift a decoded record into this type.
    fn from_record(record: Record) -> Result<Self>;

    /// Lower this value into a record (annotated fields only, declaration order).
    fn to_record(&self) -> Record;
}

/// Declare a wire record struct.
///
/// Each field may carry a `#[wire = "N"]` ordinal annotation giving its position in
/// the wire layout. Fields without one are kept on the struct but skipped by the
/// decoder and default-initialised when lifting a record; payload packets use
/// this for their embedded header. The attribute must come after any doc
/// comments on the field.
///
/// The macro derives `Debug`, `Clone`, `Default` and `PartialEq`; further derives
/// can be passed as attributes on the struct.
///
/// ```rust
/// use slipstream::wire_record;
/// use slipstream::decoder::decode_bytes;
///
/// wire_record! {
///     /// Front and rear tyre temperatures.
///     pub struct TyreTemps {
///         #[wire = "1"]
///         pub front: u16,
///         /// Rear axle average
///         #[wire = "0"]
///         pub rear: u16,
///         pub note: u32,
///     }
/// }
///
/// let data = [0x5A, 0x00, 0x64, 0x00];
/// let temps: TyreTemps = decode_bytes(&data).unwrap();
/// assert_eq!(temps.rear, 90);
/// assert_eq!(temps.front, 100);
/// assert_eq!(temps.note, 0);
/// ```
#[macro_export]
macro_rules! wire_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[doc = $doc:literal])*
                $(#[wire = $ordinal:literal])?
                pub $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $(
                $(#[doc = $doc])*
                pub $field: $ty,
            )*
        }

        impl $crate::schema::WireRecord for $name {
            const NAME: &'static str = stringify!($name);

            fn declare() -> ::std::vec::Vec<$crate::types::FieldDecl> {
                ::std::vec![
                    $(
                        $crate::types::FieldDecl {
                            name: stringify!($field),
                            ordinal: $crate::__wire_ordinal!($($ordinal)?),
                            kind: <$ty as $crate::types::WireType>::kind(),
                        },
                    )*
                ]
            }

            fn schema_cell() -> &'static ::std::sync::OnceLock<$crate::schema::SchemaSlot> {
                static CELL: ::std::sync::OnceLock<$crate::schema::SchemaSlot> =
                    ::std::sync::OnceLock::new();
                &CELL
            }

            #[allow(unused_mut, unused_variables)]
            fn from_record(mut record: $crate::types::Record) -> $crate::Result<Self> {
                ::std::result::Result::Ok(Self {
                    $( $field: $crate::__wire_take!(record, $field, $ty $(, $ordinal)?), )*
                })
            }

            #[allow(unused_mut)]
            fn to_record(&self) -> $crate::types::Record {
                let mut record = $crate::types::Record::new(stringify!($name));
                $( $crate::__wire_put!(record, self, $field, $ty $(, $ordinal)?); )*
                record
            }
        }

        impl $crate::types::WireType for $name {
            fn kind() -> $crate::types::FieldKind {
                $crate::types::FieldKind::Nested($crate::types::RecordRef::of::<Self>())
            }

            fn from_value(value: $crate::types::Value) -> $crate::Result<Self> {
                match value {
                    $crate::types::Value::Record(record) => {
                        <Self as $crate::schema::WireRecord>::from_record(record)
                    }
                    other => ::std::result::Result::Err($crate::TelemetryError::TypeConversion {
                        details: ::std::format!(
                            "Expected {} record, got {}",
                            stringify!($name),
                            other.type_name()
                        ),
                    }),
                }
            }

            fn to_value(&self) -> $crate::types::Value {
                $crate::types::Value::Record(<Self as $crate::schema::WireRecord>::to_record(self))
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __wire_ordinal {
    () => {
        ::std::option::Option::None
    };
    ($ordinal:literal) => {
        ::std::option::Option::Some($ordinal)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __wire_take {
    ($record:ident, $field:ident, $ty:ty) => {
        <$ty as ::std::default::Default>::default()
    };
    ($record:ident, $field:ident, $ty:ty, $ordinal:literal) => {
        $record.take::<$ty>(stringify!($field))?
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __wire_put {
    ($record:ident, $this:ident, $field:ident, $ty:ty) => {};
    ($record:ident, $this:ident, $field:ident, $ty:ty, $ordinal:literal) => {
        $record.push(stringify!($field), <$ty as $crate::types::WireType>::to_value(&$this.$field))
    };
}
