//! Error types for XTF parsing, validation, and export.

use thiserror::Error;

use crate::value::ValueKind;

/// Failure modes surfaced by the data model and the XML codec.
///
/// Decode and encode are all-or-nothing: no partial trajectory or partial
/// document survives a failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum XtfError {
    /// Structural or grammar violation in an XTF document, including
    /// documents that are not well-formed XML.
    #[error("malformed XTF document: {0}")]
    Format(String),

    /// Cross-field dimensionality or schema mismatch.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Typed accessor used against the wrong [`Value`](crate::Value) variant.
    #[error("value type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Bounds-checked index past the end of the state list.
    #[error("index {index} is out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Underlying file could not be read or written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, XtfError>;
