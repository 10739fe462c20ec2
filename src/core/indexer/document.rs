//! Document assembly and submission.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::error::{DocsiftError, Result};
use crate::core::extract::{ExtractorRegistry, FileType};
use crate::core::indexer::DuplicateChecker;
use crate::core::storage::DocumentStore;
use crate::core::types::{Document, DOC_TYPE};

/// Result of indexing one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOutcome {
    /// A new document was created
    Created {
        id: String,
        /// Extraction failed and the document has empty content
        extraction_failed: bool,
    },
    /// The fingerprint is already indexed (or in flight)
    Duplicate,
}

type ClaimKey = (String, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    InFlight,
    Created,
}

/// Builds documents from files and submits them to the store
///
/// Check-then-create is single-flight per (index, fingerprint): a
/// claim is taken before the duplicate check and kept once the
/// document is created, so concurrent callers and documents that are
/// created but not yet flushed are both seen as duplicates. A failed
/// submission releases the claim; [`flush`] drops the claims of
/// documents it made visible to the store's own lookups.
///
/// [`flush`]: DocumentIndexer::flush
pub struct DocumentIndexer {
    store: Arc<dyn DocumentStore>,
    extractors: ExtractorRegistry,
    checker: DuplicateChecker,
    claims: Mutex<HashMap<ClaimKey, Claim>>,
}

impl DocumentIndexer {
    pub fn new(store: Arc<dyn DocumentStore>, extractors: ExtractorRegistry) -> Self {
        Self {
            checker: DuplicateChecker::new(Arc::clone(&store)),
            store,
            extractors,
            claims: Mutex::new(HashMap::new()),
        }
    }

    /// Index one file under `index`
    pub fn index(
        &self,
        path: &Path,
        file_type: FileType,
        fingerprint: &str,
        index: &str,
    ) -> Result<IndexOutcome> {
        let key = (index.to_string(), fingerprint.to_string());
        if !self.claim(&key)? {
            tracing::debug!("Skipping {:?}: fingerprint {} in flight", path, fingerprint);
            return Ok(IndexOutcome::Duplicate);
        }

        if self.checker.is_already_indexed(fingerprint, index) {
            tracing::info!("Skipping {:?}: already indexed in '{}'", path, index);
            return Ok(IndexOutcome::Duplicate);
        }

        let (document, extraction_failed) = self.build_document(path, file_type, fingerprint);

        let outcome = match self.store.create(index, DOC_TYPE, &document) {
            Ok(id) if !id.is_empty() => Ok(IndexOutcome::Created {
                id,
                extraction_failed,
            }),
            Ok(_) => Err(DocsiftError::IndexingFailed(format!(
                "Store returned an empty id for {path:?}"
            ))),
            Err(e) => Err(DocsiftError::IndexingFailed(format!(
                "Failed to submit {path:?}: {e}"
            ))),
        };

        match &outcome {
            Ok(IndexOutcome::Created { id, .. }) => {
                tracing::info!("Indexed {:?} into '{}' as {}", path, index, id);
                self.mark_created(&key);
            }
            _ => self.release(&key),
        }

        outcome
    }

    fn build_document(&self, path: &Path, file_type: FileType, fingerprint: &str) -> (Document, bool) {
        let (content, extraction_failed) = match self.extractors.extract(path, file_type) {
            Ok(text) => (text, false),
            Err(e) => {
                tracing::warn!("Extraction failed for {:?}, indexing without content: {}", path, e);
                (String::new(), true)
            }
        };

        let title = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let author = path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        let document = Document {
            id: None,
            author,
            title,
            path: path.display().to_string(),
            content,
            file_fingerprint: fingerprint.to_string(),
        };

        (document, extraction_failed)
    }

    /// Flush `index` and drop the claims its commit covers
    ///
    /// Only claims whose documents were created before the flush
    /// started are dropped; those documents are now found by the
    /// duplicate check. In-flight claims stay.
    pub fn flush(&self, index: &str) -> Result<()> {
        let covered: Vec<ClaimKey> = self
            .lock_claims()?
            .iter()
            .filter(|(key, state)| key.0 == index && **state == Claim::Created)
            .map(|(key, _)| key.clone())
            .collect();

        self.store.flush(index)?;

        let mut claims = self.lock_claims()?;
        for key in &covered {
            claims.remove(key);
        }
        tracing::debug!("Flushed '{}', released {} claims", index, covered.len());
        Ok(())
    }

    fn lock_claims(&self) -> Result<MutexGuard<'_, HashMap<ClaimKey, Claim>>> {
        self.claims
            .lock()
            .map_err(|_| DocsiftError::IndexingFailed("Claim set lock poisoned".to_string()))
    }

    /// Take the claim for `key`; false when already held
    fn claim(&self, key: &ClaimKey) -> Result<bool> {
        let mut claims = self.lock_claims()?;
        if claims.contains_key(key) {
            return Ok(false);
        }
        claims.insert(key.clone(), Claim::InFlight);
        Ok(true)
    }

    fn mark_created(&self, key: &ClaimKey) {
        if let Ok(mut claims) = self.claims.lock() {
            claims.insert(key.clone(), Claim::Created);
        }
    }

    fn release(&self, key: &ClaimKey) {
        if let Ok(mut claims) = self.claims.lock() {
            claims.remove(key);
        }
    }

    #[cfg(test)]
    fn claim_count(&self) -> usize {
        self.claims.lock().map(|claims| claims.len()).unwrap_or(0)
    }
}
