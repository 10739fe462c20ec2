//! docsift - Document crawler and full-text search
//!
//! Crawls a filesystem tree, extracts plain text from text, source,
//! docx and pdf files, and indexes each file into a named Tantivy
//! index. Files whose content fingerprint is already indexed are
//! skipped, so re-running a crawl is cheap and idempotent.
//!
//! # Architecture
//!
//! The codebase is organized into two main modules:
//!
//! - **core**: Domain logic (front-end agnostic)
//!   - config, error, types, xdg
//!   - extract (format dispatch table and extractors)
//!   - storage (document store trait, named Tantivy indices)
//!   - indexer (walker, admission, fingerprint, dedup, pipeline)
//!   - search (query gateway with highlighting)
//!   - services (unified service container)
//!
//! - **cli**: Command-line adapter (depends on core)
//!   - index, search, list-indices, show-config, completions
//!
//! # Key Features
//!
//! - MD5 content fingerprints as the deduplication key
//! - Single-flight check-then-create per fingerprint
//! - Extraction failures still index the file (empty content)
//! - Symlink-cycle safe traversal
//! - Query-string search with `<em>` highlighting

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{DocsiftError, Result};
pub use core::services::Services;
pub use core::storage::{DocumentStore, IndexMetadata, TantivyStore};
pub use core::types::*;
