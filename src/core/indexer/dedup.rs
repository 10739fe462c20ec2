//! Fingerprint-based duplicate detection.

use std::sync::Arc;

use crate::core::storage::{fields, DocumentStore};
use crate::core::types::DOC_TYPE;

/// Asks the document store whether a fingerprint is already indexed
///
/// Best effort: any store error counts as "not indexed", so a file
/// may be indexed twice under store faults but is never dropped.
pub struct DuplicateChecker {
    store: Arc<dyn DocumentStore>,
}

impl DuplicateChecker {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Whether a document with `fingerprint` exists in `index`
    pub fn is_already_indexed(&self, fingerprint: &str, index: &str) -> bool {
        match self
            .store
            .count_term(index, DOC_TYPE, fields::FILE_FINGERPRINT, fingerprint)
        {
            Ok(count) => count > 0,
            Err(e) if e.is_not_found() => {
                tracing::debug!("Index '{}' does not exist yet: {}", index, e);
                false
            }
            Err(e) => {
                tracing::warn!(
                    "Duplicate check for {} in '{}' failed, treating as not indexed: {}",
                    fingerprint,
                    index,
                    e
                );
                false
            }
        }
    }
}
