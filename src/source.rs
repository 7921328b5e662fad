//! Cursor boundary: the pull-based document source
//!
//! A [`DocumentSource`] is the stream's only view of the document store. It
//! mirrors a remote cursor: probe for more, fetch one document, both fallible
//! and both potentially blocking on I/O performed by the underlying driver.
//! The reader owns its source exclusively, so implementations never need
//! internal synchronization for the stream's sake.

use crate::document::Document;
use crate::errors::{Result, StreamError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

/// Pull-based source of documents, owned exclusively by one stream.
///
/// Callers must check [`has_more`](DocumentSource::has_more) before
/// [`next_document`](DocumentSource::next_document); fetching past the end is
/// a source error.
pub trait DocumentSource {
    /// Whether another document can be fetched. May block while the
    /// underlying cursor pulls its next page.
    fn has_more(&mut self) -> Result<bool>;

    /// Fetch the next document. Only valid after `has_more` returned true.
    fn next_document(&mut self) -> Result<Document>;

    /// Human-readable kind label for this source, e.g. `"memory"` or
    /// `"mongodb"`.
    fn kind(&self) -> &str;

    /// Unique-enough identity for diagnostics, stable for the source's
    /// lifetime.
    fn identity(&self) -> String;
}

static NEXT_MEMORY_SOURCE_ID: AtomicU64 = AtomicU64::new(0);

/// In-memory document source backed by a queue.
///
/// Covers tests and embedders with pre-fetched result sets; documents are
/// yielded in the order they were supplied.
#[derive(Debug)]
pub struct MemoryDocumentSource {
    documents: VecDeque<Document>,
    id: u64,
}

impl MemoryDocumentSource {
    pub fn new(documents: Vec<Document>) -> Self {
        MemoryDocumentSource {
            documents: documents.into(),
            id: NEXT_MEMORY_SOURCE_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Documents not yet handed out.
    pub fn remaining(&self) -> usize {
        self.documents.len()
    }
}

impl DocumentSource for MemoryDocumentSource {
    fn has_more(&mut self) -> Result<bool> {
        Ok(!self.documents.is_empty())
    }

    fn next_document(&mut self) -> Result<Document> {
        self.documents
            .pop_front()
            .ok_or_else(|| StreamError::source("memory source exhausted"))
    }

    fn kind(&self) -> &str {
        "memory"
    }

    fn identity(&self) -> String {
        format!("memory-{}", self.id)
    }
}
