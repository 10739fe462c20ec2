//! Indexing pipeline orchestration.
//!
//! Coordinates the end-to-end indexing workflow:
//! 1. Walk the path
//! 2. Admit files by name, type and size
//! 3. Fingerprint and check for duplicates
//! 4. Extract text and submit the document
//! 5. Flush the index

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::extract::ExtractorRegistry;
use crate::core::indexer::{
    fingerprint_file, Admission, AdmissionFilter, DirectoryWalker, DocumentIndexer, IndexOutcome,
};
use crate::core::storage::{validate_index_name, DocumentStore};
use crate::core::types::IndexStats;

/// Orchestrates the indexing pipeline
pub struct IndexingPipeline {
    walker: DirectoryWalker,
    admission: AdmissionFilter,
    indexer: DocumentIndexer,
    max_file_size_bytes: u64,
}

impl IndexingPipeline {
    /// Create a new indexing pipeline
    ///
    /// # Arguments
    ///
    /// * `store` - Document store receiving the documents
    /// * `extractors` - Format to extractor dispatch table
    /// * `exclude_patterns` - Glob patterns for files and directories to skip
    /// * `max_file_size_mb` - Maximum file size in megabytes
    pub fn new(
        store: Arc<dyn DocumentStore>,
        extractors: ExtractorRegistry,
        exclude_patterns: &[String],
        max_file_size_mb: usize,
    ) -> Result<Self> {
        let admission = AdmissionFilter::new(exclude_patterns)?;

        Ok(Self {
            walker: DirectoryWalker::new(admission.clone()),
            indexer: DocumentIndexer::new(store, extractors),
            admission,
            max_file_size_bytes: (max_file_size_mb as u64) * 1024 * 1024,
        })
    }

    /// Create a pipeline from the indexing configuration
    pub fn from_config(store: Arc<dyn DocumentStore>, config: &Config) -> Result<Self> {
        Self::new(
            store,
            ExtractorRegistry::default(),
            &config.indexing.exclude_patterns,
            config.indexing.max_file_size_mb,
        )
    }

    /// Recursively index `path` into `index`
    ///
    /// A missing path succeeds with nothing indexed. Per-file
    /// failures are logged and counted; they never stop the walk.
    /// Created documents are flushed before returning.
    pub fn index_path(&self, path: &Path, index: &str) -> Result<IndexStats> {
        validate_index_name(index)?;
        let start = Instant::now();

        tracing::info!("Indexing {:?} into '{}'", path, index);

        let mut stats = IndexStats {
            index: index.to_string(),
            ..IndexStats::default()
        };

        let summary = self
            .walker
            .walk(path, &mut |file| self.process_file(file, index, &mut stats))?;

        stats.files_seen = summary.files_seen;
        stats.traversal_errors = summary.traversal_errors;

        if stats.files_indexed > 0 {
            self.indexer.flush(index)?;
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Indexing complete: {} files seen, {} indexed, {} duplicates, \
             {} filtered, {} extraction failures, {} submission failures in {}ms",
            stats.files_seen,
            stats.files_indexed,
            stats.duplicates_skipped,
            stats.files_filtered,
            stats.extraction_failures,
            stats.submission_failures,
            stats.duration_ms
        );

        Ok(stats)
    }

    fn process_file(&self, path: &Path, index: &str, stats: &mut IndexStats) {
        let file_type = match self.admission.admit(path) {
            Admission::Accept(file_type) => file_type,
            verdict => {
                tracing::debug!("Skipping {:?}: {:?}", path, verdict);
                stats.files_filtered += 1;
                return;
            }
        };

        match fs::metadata(path) {
            Ok(metadata) if metadata.len() > self.max_file_size_bytes => {
                tracing::warn!(
                    "Skipping large file: {:?} ({} bytes)",
                    path,
                    metadata.len()
                );
                stats.files_filtered += 1;
                return;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Failed to stat {:?}: {}", path, e);
                stats.submission_failures += 1;
                return;
            }
        }

        let fingerprint = match fingerprint_file(path) {
            Ok(fingerprint) => fingerprint,
            Err(e) => {
                tracing::warn!("Failed to fingerprint {:?}: {}", path, e);
                stats.submission_failures += 1;
                return;
            }
        };

        match self.indexer.index(path, file_type, &fingerprint, index) {
            Ok(IndexOutcome::Created {
                extraction_failed, ..
            }) => {
                stats.files_indexed += 1;
                if extraction_failed {
                    stats.extraction_failures += 1;
                }
            }
            Ok(IndexOutcome::Duplicate) => stats.duplicates_skipped += 1,
            Err(e) => {
                tracing::warn!("Failed to index {:?}: {}", path, e);
                stats.submission_failures += 1;
            }
        }
    }
}
