//! Error types for document-to-batch streaming
//!
//! One crate-wide enum covers the two hard failure classes of the conversion
//! (unsupported target column types at binding time, dynamic-kind mismatches
//! at row materialization time) plus the boundary failures around them
//! (cursor errors, batch assembly errors, invalid construction parameters).

use crate::document::FieldKind;
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StreamError>;

/// Errors produced while binding a target schema or streaming batches.
#[derive(Error, Debug)]
pub enum StreamError {
    /// A target column's Arrow type has no coercion rule. Raised once at
    /// binding time, never per row.
    #[error("Unsupported column type: {0}")]
    UnsupportedColumnType(DataType),

    /// A present source field's dynamic kind disagrees with the column's
    /// expected kind. Raised at row materialization time; fatal for the
    /// stream, never downgraded to a default value.
    #[error("Type mismatch for field \"{field}\": expected {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: FieldKind,
        found: FieldKind,
    },

    /// The target schema names the same field twice. Lookups are by name,
    /// so duplicates would make column resolution ambiguous.
    #[error("Duplicate field \"{0}\" in target schema")]
    DuplicateField(String),

    /// The per-batch row cap must be at least 1.
    #[error("Invalid max batch size {0}, must be at least 1")]
    InvalidBatchSize(usize),

    /// A JSON payload could not be converted into a document.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// The underlying document source failed while probing or fetching.
    #[error("Document source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Batch assembly was rejected by Arrow.
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

impl StreamError {
    /// Shorthand for the mismatch variant, used by every coercion arm.
    pub fn type_mismatch(field: &str, expected: FieldKind, found: FieldKind) -> Self {
        StreamError::TypeMismatch {
            field: field.to_string(),
            expected,
            found,
        }
    }

    /// Wrap an arbitrary source-side failure.
    pub fn source<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        StreamError::Source(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_column_type_names_the_type() {
        let err = StreamError::UnsupportedColumnType(DataType::LargeUtf8);
        assert_eq!(err.to_string(), "Unsupported column type: LargeUtf8");
    }

    #[test]
    fn test_type_mismatch_names_both_kinds() {
        let err = StreamError::type_mismatch("seen", FieldKind::DateTime, FieldKind::Number);
        let msg = err.to_string();
        assert!(msg.contains("seen"), "message should name the field: {}", msg);
        assert!(msg.contains("DateTime"), "message should name the expected kind: {}", msg);
        assert!(msg.contains("Number"), "message should name the found kind: {}", msg);
    }

    #[test]
    fn test_source_error_wraps_message() {
        let err = StreamError::source("connection reset");
        assert_eq!(err.to_string(), "Document source error: connection reset");
    }

    #[test]
    fn test_invalid_batch_size_display() {
        let err = StreamError::InvalidBatchSize(0);
        assert_eq!(err.to_string(), "Invalid max batch size 0, must be at least 1");
    }
}
