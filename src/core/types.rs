//! Core data types for docsift.
//!
//! This module defines the data structures shared by the indexing
//! pipeline, the document store and the search gateway.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Document type label every document is created and searched under
pub const DOC_TYPE: &str = "files";

/// Highlight fragments keyed by field name
pub type Highlights = BTreeMap<String, Vec<String>>;

/// The unit stored in and retrieved from a document index
///
/// A document is created once per (file, content-version) pair and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier assigned by the store on creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Containing directory path (provenance label)
    pub author: String,

    /// File base name
    pub title: String,

    /// File path at index time
    pub path: String,

    /// Extracted plain text (empty when extraction produced nothing)
    pub content: String,

    /// Content hash of the source file at index time
    pub file_fingerprint: String,
}

/// A ranked search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Index the document was found in
    pub index: String,

    /// Relevance score (higher = more relevant)
    pub score: f32,

    /// The matched document
    pub document: Document,

    /// Highlighted fragments per field, present only when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlights>,
}

/// Statistics from one `index_path` run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Target index name
    pub index: String,

    /// Regular files encountered during traversal
    pub files_seen: usize,

    /// Documents created
    pub files_indexed: usize,

    /// Files skipped because their fingerprint was already indexed
    pub duplicates_skipped: usize,

    /// Files rejected by admission (lock files, unsupported types,
    /// exclude patterns, size limit)
    pub files_filtered: usize,

    /// Files whose extraction failed (indexed with empty content)
    pub extraction_failures: usize,

    /// Files that could not be fingerprinted or submitted
    pub submission_failures: usize,

    /// Subtrees abandoned because of traversal errors
    pub traversal_errors: usize,

    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Request to search indexed documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query in the store's native query-string syntax
    pub keyword: String,

    /// Index to search; `None` or empty searches all indices
    #[serde(default)]
    pub index: Option<String>,

    /// Request highlighted fragments for path, title and content
    #[serde(default)]
    pub highlight: bool,

    /// Number of hits to return (optional)
    #[serde(default)]
    pub k: Option<usize>,
}

/// Response from a search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Original query string
    pub query: String,

    /// Ranked hits
    pub hits: Vec<SearchHit>,

    /// Number of hits returned
    pub count: usize,

    /// Query duration in milliseconds
    pub duration_ms: u64,
}
