//! Error types for telemetry decoding.
//!
//! This module provides the error taxonomy for the slipstream decoder. All errors
//! implement `std::error::Error` and carry enough context (offending field path,
//! buffer offset) to diagnose a failure without re-running the decode.
//!
//! ## Error Categories
//!
//! - **Wire Errors**: the buffer does not match the schema (`UnexpectedEof`,
//!   `InvalidBoolean`)
//! - **Schema Errors**: a record type is declared incorrectly ([`SchemaError`])
//! - **Conversion Errors**: a decoded record cannot be lifted into a typed struct
//! - **File Errors**: I/O failures in buffer sources and the converter
//! - **Serialization Errors**: JSON output failures
//!
//! An unsupported packet id is *not* an error; see
//! [`Classified::Unsupported`](crate::catalog::Classified::Unsupported).
//!
//! ## Field Paths
//!
//! Wire errors are raised by the byte cursor without knowing which field was being
//! read. The decoder attaches the field path as the error unwinds:
//!
//! ```rust
//! use slipstream::TelemetryError;
//!
//! let error = TelemetryError::unexpected_eof(30, 4, 2).within("x").within("world_position");
//! assert_eq!(error.field(), Some("world_position.x"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for telemetry operations.
pub type Result<T, E = TelemetryError> = std::result::Result<T, E>;

/// Main error type for telemetry operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TelemetryError {
    #[error(
        "Unexpected end of buffer at offset {offset} reading {}: need {needed} bytes, {remaining} remaining",
        display_field(.field)
    )]
    UnexpectedEof { field: Option<String>, offset: usize, needed: usize, remaining: usize },

    #[error("Invalid boolean byte {value:#04x} at offset {offset} reading {}", display_field(.field))]
    InvalidBoolean { field: Option<String>, offset: usize, value: u8 },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Field '{field}' not found in decoded record")]
    FieldNotFound { field: String },

    #[error("Type conversion error: {details}")]
    TypeConversion { details: String },

    #[error("Cannot encode field '{field}': {details}")]
    Encode { field: String, details: String },

    #[error("File error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed for {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Structural defects in a record type's wire declaration.
///
/// These are programming-time errors (a misdeclared type), not bad wire data.
/// They are cached alongside successful schemas, so every decode of the
/// offending type reports the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    #[error("Invalid wire ordinal {annotation:?} on {record}.{field}")]
    InvalidOrdinal { record: &'static str, field: &'static str, annotation: String },

    #[error("Unsupported field kind {kind} on {record}.{field}")]
    UnsupportedFieldKind { record: &'static str, field: &'static str, kind: String },
}

fn display_field(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("<unknown field>")
}

impl TelemetryError {
    /// Returns whether this error is potentially recoverable through retry.
    ///
    /// Decoding is deterministic, so only I/O failures qualify: re-reading the
    /// same bytes always produces the same wire or schema error.
    pub fn is_retryable(&self) -> bool {
        match self {
            TelemetryError::File { .. } => true,
            TelemetryError::UnexpectedEof { .. } => false,
            TelemetryError::InvalidBoolean { .. } => false,
            TelemetryError::Schema(_) => false,
            TelemetryError::FieldNotFound { .. } => false,
            TelemetryError::TypeConversion { .. } => false,
            TelemetryError::Encode { .. } => false,
            TelemetryError::Serialization { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            TelemetryError::UnexpectedEof { .. } => vec![
                "Check the capture stores complete datagrams",
                "Verify the packet format matches the decoder (F1 2020)",
                "Discard the buffer and continue with the next one",
            ],
            TelemetryError::InvalidBoolean { .. } => vec![
                "Verify the packet format matches the decoder (F1 2020)",
                "Check the buffer was not corrupted in storage",
            ],
            TelemetryError::Schema(_) => vec![
                "Fix the wire ordinal annotations on the record type",
                "Use a supported primitive width for the field",
            ],
            TelemetryError::FieldNotFound { .. } => vec![
                "Check field name spelling",
                "Verify the record was decoded with the matching schema",
            ],
            TelemetryError::TypeConversion { .. } => vec![
                "Check data type compatibility",
                "Verify expected vs actual field types",
            ],
            TelemetryError::Encode { .. } => vec![
                "Build the record from the same schema used for encoding",
                "Check array lengths match the fixed layout",
            ],
            TelemetryError::File { .. } => vec![
                "Check file exists and is readable",
                "Check output directory permissions",
                "Ensure sufficient disk space",
            ],
            TelemetryError::Serialization { .. } => vec![
                "Check decoded values are representable in JSON",
            ],
        }
    }

    /// Helper constructor for short buffers. The field path is attached later.
    pub fn unexpected_eof(offset: usize, needed: usize, remaining: usize) -> Self {
        TelemetryError::UnexpectedEof { field: None, offset, needed, remaining }
    }

    /// Helper constructor for boolean bytes outside {0, 1}.
    pub fn invalid_boolean(offset: usize, value: u8) -> Self {
        TelemetryError::InvalidBoolean { field: None, offset, value }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TelemetryError::File { path: path.into(), source }
    }

    /// Helper constructor for JSON serialization failures.
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        TelemetryError::Serialization { context: context.into(), source }
    }

    /// Helper constructor for encoder mismatches.
    pub fn encode(field: impl Into<String>, details: impl Into<String>) -> Self {
        TelemetryError::Encode { field: field.into(), details: details.into() }
    }

    /// Prefix the field path of a wire error with an enclosing segment.
    ///
    /// Array index segments (`[3]`) attach without a separating dot. Errors that
    /// carry no field path are returned unchanged.
    pub fn within(mut self, segment: &str) -> Self {
        if let TelemetryError::UnexpectedEof { field, .. }
        | TelemetryError::InvalidBoolean { field, .. } = &mut self
        {
            *field = Some(match field.take() {
                Some(inner) if inner.starts_with('[') => format!("{segment}{inner}"),
                Some(inner) => format!("{segment}.{inner}"),
                None => segment.to_string(),
            });
        }
        self
    }

    /// Field path of a wire error, if one was attached.
    pub fn field(&self) -> Option<&str> {
        match self {
            TelemetryError::UnexpectedEof { field, .. }
            | TelemetryError::InvalidBoolean { field, .. } => field.as_deref(),
            TelemetryError::FieldNotFound { field } | TelemetryError::Encode { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }
}

impl From<std::io::Error> for TelemetryError {
    fn from(err: std::io::Error) -> Self {
        TelemetryError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}
