//! # docbatch
//!
//! Streaming conversion of schema-less document-store result sets into typed
//! Arrow record batches.
//!
//! A [`DocumentBatchReader`] exclusively owns a [`DocumentSource`] (a
//! pull-based cursor over dynamically typed documents) and converts it into
//! fixed-shape record batches for a host analytical engine:
//!
//! - **Binding** resolves the target Arrow schema against the closed
//!   [`ColumnType`] set once, at construction; unsupported column types fail
//!   fast, before any document is read.
//! - **Materialization** looks fields up by name. An absent field takes the
//!   column's canonical zero/empty default; a present field must match the
//!   column's expected dynamic kind and is coerced, otherwise the stream
//!   fails with [`StreamError::TypeMismatch`].
//! - **Batching** accumulates rows up to a configured cap per
//!   [`next_batch`](DocumentBatchReader::next_batch) call and reports a
//!   terminal, idempotent end-of-stream once the cursor drains.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use arrow::datatypes::{DataType, Field, Schema};
//! use docbatch::{Document, DocumentBatchReader, FieldValue, MemoryDocumentSource};
//!
//! # fn main() -> docbatch::Result<()> {
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("id", DataType::UInt32, false),
//!     Field::new("name", DataType::Utf8, false),
//! ]));
//! let source = MemoryDocumentSource::new(vec![
//!     Document::new()
//!         .with_field("id", FieldValue::Int32(1))
//!         .with_field("name", FieldValue::String("a".into())),
//! ]);
//!
//! let mut reader = DocumentBatchReader::try_new(source, schema, 1024)?;
//! while let Some(batch) = reader.next_batch()? {
//!     assert_eq!(batch.num_rows(), 1);
//! }
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod errors;
pub mod reader;
pub mod schema;
mod sink;
pub mod source;
pub mod types;

pub use document::{Document, FieldKind, FieldValue};
pub use errors::{Result, StreamError};
pub use reader::{DocumentBatchReader, DEFAULT_MAX_BATCH_SIZE};
pub use schema::{bind_schema, ColumnPlan};
pub use source::{DocumentSource, MemoryDocumentSource};
pub use types::ColumnType;
