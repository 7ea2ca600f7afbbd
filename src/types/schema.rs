//! Wire schema types

use super::FieldKind;
use crate::{Result, SchemaError};

/// One field as declared on a record type, in declaration order.
///
/// `ordinal` is the raw wire-position annotation. Fields without one are not
/// part of the wire schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field identifier
    pub name: &'static str,
    /// Wire ordinal annotation, e.g. `Some("4")`
    pub ordinal: Option<&'static str>,
    /// Wire kind derived from the field's Rust type
    pub kind: FieldKind,
}

/// A validated field in a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Position in the wire layout
    pub ordinal: u32,
    /// Field identifier
    pub name: &'static str,
    /// Wire kind
    pub kind: FieldKind,
}

/// Immutable, ordinal-ordered field list for one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    record: &'static str,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Build a schema from a record's field declarations.
    ///
    /// Unannotated fields are dropped, annotations must parse as non-negative
    /// integers, and every kind must be decodable. The remaining fields are sorted
    /// by ordinal with a stable sort, so duplicate ordinals keep declaration order.
    pub fn from_declarations(
        record: &'static str,
        declarations: Vec<FieldDecl>,
    ) -> std::result::Result<Self, SchemaError> {
        let mut fields = Vec::with_capacity(declarations.len());

        for decl in declarations {
            let Some(annotation) = decl.ordinal else {
                continue;
            };

            let ordinal = annotation.parse::<u32>().map_err(|_| SchemaError::InvalidOrdinal {
                record,
                field: decl.name,
                annotation: annotation.to_string(),
            })?;

            if !decl.kind.is_supported() {
                return Err(SchemaError::UnsupportedFieldKind {
                    record,
                    field: decl.name,
                    kind: decl.kind.to_string(),
                });
            }

            fields.push(FieldDescriptor { ordinal, name: decl.name, kind: decl.kind });
        }

        fields.sort_by_key(|field| field.ordinal);

        Ok(Self { record, fields })
    }

    /// Name of the record type this schema describes.
    pub fn record_name(&self) -> &'static str {
        self.record
    }

    /// Fields in wire order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total bytes one record of this schema occupies on the wire.
    ///
    /// Nested schemas are resolved through the registry, so this fails if any
    /// nested record type is misdeclared.
    pub fn wire_size(&self) -> Result<usize> {
        let mut size = 0usize;
        for field in &self.fields {
            size += match field.kind {
                FieldKind::Primitive(primitive) => usize::from(primitive.width),
                FieldKind::Boolean => 1,
                FieldKind::Nested(record) => record.schema()?.wire_size()?,
                FieldKind::FixedArray(record, len) => record.schema()?.wire_size()? * len,
            };
        }
        Ok(size)
    }
}
