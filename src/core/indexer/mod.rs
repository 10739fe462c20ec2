//! Document indexing module.
//!
//! Turns a filesystem path into documents in a named index:
//!
//! - Directory traversal on canonical paths with a visited set
//! - Admission by lock-file prefix, type allow-list and exclude patterns
//! - MD5 content fingerprints as the deduplication key
//! - Single-flight duplicate check and document submission
//! - Pipeline orchestration with per-run statistics
//!
//! Per-file failures are logged with the file path and counted in
//! [`IndexStats`](crate::core::types::IndexStats); they never abort
//! the walk.

pub mod admission;
pub mod dedup;
pub mod document;
pub mod fingerprint;
pub mod pipeline;
pub mod walker;

pub use admission::{Admission, AdmissionFilter, LOCK_FILE_PREFIX};
pub use dedup::DuplicateChecker;
pub use document::{DocumentIndexer, IndexOutcome};
pub use fingerprint::{fingerprint_bytes, fingerprint_file};
pub use pipeline::IndexingPipeline;
pub use walker::{DirectoryWalker, WalkSummary};
