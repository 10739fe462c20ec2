//! Document store layer.
//!
//! [`DocumentStore`] is the seam to the document index: it creates
//! documents with store-assigned ids, answers exact-term queries on
//! keyword fields, and runs free-text searches with optional
//! highlighting. [`TantivyStore`] implements it on top of Tantivy,
//! one on-disk index per index name.
//!
//! # Storage Structure
//!
//! ```text
//! {index_dir}/
//! ├── {index-name-1}/
//! │   ├── meta.json           # Index metadata
//! │   └── tantivy/            # Tantivy index
//! │       ├── .managed.json
//! │       ├── meta.json
//! │       └── [segment files]
//! ```

mod catalog;
mod tantivy;

pub use catalog::{validate_index_name, IndexMetadata, StoreOptions, TantivyStore};
pub use self::tantivy::{create_schema, TantivyIndex, SCHEMA_VERSION};

use crate::core::error::Result;
use crate::core::types::{Document, SearchHit};

/// Schema field names
pub mod fields {
    pub const ID: &str = "id";
    pub const DOC_TYPE: &str = "doc_type";
    pub const AUTHOR: &str = "author";
    pub const TITLE: &str = "title";
    pub const PATH: &str = "path";
    pub const CONTENT: &str = "content";
    pub const FILE_FINGERPRINT: &str = "file_fingerprint";
    pub const INDEXED_AT: &str = "indexed_at";

    /// Fields a free-text query searches by default
    pub const DEFAULT_SEARCH: [&str; 5] = [TITLE, PATH, CONTENT, AUTHOR, FILE_FINGERPRINT];
}

/// A free-text query against one or more indices
#[derive(Debug, Clone)]
pub struct StoreQuery {
    /// Query string in the store's native syntax, passed verbatim
    pub query: String,

    /// Indices to search; empty means all
    pub indices: Vec<String>,

    /// Only documents created under this type label match
    pub doc_type: String,

    /// Fields to produce highlight fragments for; empty disables
    /// highlighting
    pub highlight_fields: Vec<String>,

    /// Maximum number of hits
    pub limit: usize,
}

/// Document index operations the pipeline and gateway rely on
///
/// Implementations must be safe for concurrent use.
pub trait DocumentStore: Send + Sync {
    /// Create a document in `index`, returning the assigned id
    ///
    /// The index is created on first use.
    fn create(&self, index: &str, doc_type: &str, document: &Document) -> Result<String>;

    /// Count documents whose keyword `field` equals `value` exactly
    fn count_term(&self, index: &str, doc_type: &str, field: &str, value: &str) -> Result<u64>;

    /// Run a free-text query, hits ordered by descending relevance
    fn search(&self, query: &StoreQuery) -> Result<Vec<SearchHit>>;

    /// Make created documents durable and visible to queries
    fn flush(&self, index: &str) -> Result<()>;

    /// Names of all existing indices
    fn list_indices(&self) -> Result<Vec<String>>;
}
