//! Document-to-batch streaming reader
//!
//! [`DocumentBatchReader`] owns a document source exclusively and converts
//! its result set into Arrow record batches. A pull loop materializes one
//! row per document against the bound column plan until the batch cap is
//! reached or the source drains. End-of-stream is terminal: once reported,
//! the source is never touched again. Errors are fatal for the stream; there
//! is no per-row skip or resynchronization.

use crate::errors::{Result, StreamError};
use crate::schema::{bind_schema, ColumnPlan};
use crate::sink::ColumnSink;
use crate::source::DocumentSource;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use std::fmt;

/// Default per-batch row cap for callers without an opinion.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 8192;

/// Streaming converter from a document source to record batches.
///
/// The source is owned exclusively for the reader's lifetime and released
/// when the reader is dropped, whether or not the stream was drained. Calls
/// are synchronous; `next_batch` may block while the source fetches.
pub struct DocumentBatchReader<S: DocumentSource> {
    source: S,
    schema: SchemaRef,
    columns: Vec<ColumnPlan>,
    max_batch_size: usize,
    stream_id: String,
    exhausted: bool,
}

impl<S: DocumentSource> DocumentBatchReader<S> {
    /// Bind `schema` against the supported column types and take ownership
    /// of `source`.
    ///
    /// Fails fast on an unsupported column type, a duplicate field name or a
    /// zero batch cap, before any document is read. Probes the source once so
    /// an empty result set starts in the exhausted state.
    pub fn try_new(source: S, schema: SchemaRef, max_batch_size: usize) -> Result<Self> {
        if max_batch_size == 0 {
            return Err(StreamError::InvalidBatchSize(max_batch_size));
        }
        let columns = bind_schema(&schema)?;
        let stream_id = format!("{}({})", source.kind(), source.identity());

        let mut reader = DocumentBatchReader {
            source,
            schema,
            columns,
            max_batch_size,
            stream_id,
            exhausted: false,
        };
        reader.exhausted = !reader.source.has_more()?;
        log::debug!(
            "Bound {} columns for stream {} (max batch size {})",
            reader.columns.len(),
            reader.stream_id,
            reader.max_batch_size
        );
        Ok(reader)
    }

    /// Target schema shared by every produced batch.
    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    /// Kind label of the underlying source.
    pub fn name(&self) -> &str {
        self.source.kind()
    }

    /// Diagnostic identity: the source's kind and identity, e.g.
    /// `memory(memory-0)`.
    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }

    /// Whether end-of-stream has been reached.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Produce the next batch, or `None` once the source is drained.
    ///
    /// Returns at most `max_batch_size` rows per call. After end-of-stream
    /// every further call returns `None` again without touching the source.
    /// An error leaves the stream unusable; callers must not keep reading
    /// from it.
    pub fn next_batch(&mut self) -> Result<Option<RecordBatch>> {
        if self.exhausted {
            return Ok(None);
        }

        let capacity = self.max_batch_size.min(DEFAULT_MAX_BATCH_SIZE);
        let mut sinks: Vec<ColumnSink> = self
            .columns
            .iter()
            .map(|plan| ColumnSink::for_plan(plan, capacity))
            .collect();

        let mut num_rows = 0;
        while num_rows < self.max_batch_size {
            if !self.source.has_more()? {
                self.exhausted = true;
                break;
            }
            let document = self.source.next_document()?;
            for (plan, sink) in self.columns.iter().zip(sinks.iter_mut()) {
                match document.get(plan.name()) {
                    Some(value) => {
                        if let Err(err) = sink.append_value(plan.name(), value) {
                            if log::log_enabled!(log::Level::Debug) {
                                log::debug!(
                                    "Row materialization failed on stream {}: {} (document: {})",
                                    self.stream_id,
                                    err,
                                    serde_json::to_string(&document).unwrap_or_default()
                                );
                            }
                            return Err(err);
                        }
                    }
                    None => sink.append_default(),
                }
            }
            num_rows += 1;
        }

        if num_rows == 0 {
            log::trace!("Stream {} exhausted", self.stream_id);
            return Ok(None);
        }

        let arrays = sinks.iter_mut().map(|sink| sink.finish()).collect();
        let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
        let batch = RecordBatch::try_new_with_options(self.schema.clone(), arrays, &options)?;
        log::trace!(
            "Stream {} produced a batch of {} rows",
            self.stream_id,
            num_rows
        );
        Ok(Some(batch))
    }
}

impl<S: DocumentSource> Iterator for DocumentBatchReader<S> {
    type Item = Result<RecordBatch>;

    /// Iterator view of the stream. An error fuses the stream, so iteration
    /// terminates after yielding it.
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_batch() {
            Ok(Some(batch)) => Some(Ok(batch)),
            Ok(None) => None,
            Err(err) => {
                self.exhausted = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: DocumentSource> fmt::Debug for DocumentBatchReader<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentBatchReader")
            .field("stream", &self.stream_id)
            .field("columns", &self.columns.len())
            .field("max_batch_size", &self.max_batch_size)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, FieldValue};
    use crate::source::MemoryDocumentSource;
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn uint32_schema() -> SchemaRef {
        Arc::new(Schema::new(vec![Field::new("id", DataType::UInt32, false)]))
    }

    #[test]
    fn test_zero_batch_cap_rejected() {
        let source = MemoryDocumentSource::new(vec![]);
        let err = DocumentBatchReader::try_new(source, uint32_schema(), 0).unwrap_err();
        assert!(matches!(err, StreamError::InvalidBatchSize(0)));
    }

    #[test]
    fn test_unsupported_column_type_rejected_at_construction() {
        let schema = Arc::new(Schema::new(vec![Field::new("b", DataType::Boolean, false)]));
        let source = MemoryDocumentSource::new(vec![]);
        let err = DocumentBatchReader::try_new(source, schema, 16).unwrap_err();
        assert!(matches!(err, StreamError::UnsupportedColumnType(_)));
    }

    #[test]
    fn test_empty_source_starts_exhausted() {
        let source = MemoryDocumentSource::new(vec![]);
        let mut reader = DocumentBatchReader::try_new(source, uint32_schema(), 16).unwrap();
        assert!(reader.is_exhausted());
        assert!(reader.next_batch().unwrap().is_none());
        assert!(reader.next_batch().unwrap().is_none());
    }

    #[test]
    fn test_identification_surface() {
        let docs = vec![Document::new().with_field("id", FieldValue::Int32(1))];
        let source = MemoryDocumentSource::new(docs);
        let identity = source.identity();
        let reader = DocumentBatchReader::try_new(source, uint32_schema(), 16).unwrap();

        assert_eq!(reader.name(), "memory");
        assert_eq!(reader.stream_id(), format!("memory({})", identity));
        let rendered = format!("{:?}", reader);
        assert!(rendered.contains("DocumentBatchReader"));
        assert!(rendered.contains(&identity));
    }

    #[test]
    fn test_schema_is_shared_with_batches() {
        let schema = uint32_schema();
        let docs = vec![Document::new().with_field("id", FieldValue::Int32(1))];
        let source = MemoryDocumentSource::new(docs);
        let mut reader = DocumentBatchReader::try_new(source, schema.clone(), 16).unwrap();

        assert_eq!(reader.schema(), schema);
        let batch = reader.next_batch().unwrap().unwrap();
        assert_eq!(batch.schema(), schema);
    }
}
