//! Named index catalog.
//!
//! Each index name maps to its own directory holding a metadata
//! file and a Tantivy index. Handles are opened lazily and cached
//! so that one writer serves every caller in the process. Handles
//! used only for queries never take the writer lock.

use crate::core::config::Config;
use crate::core::error::{DocsiftError, Result};
use crate::core::storage::tantivy::{TantivyIndex, SCHEMA_VERSION};
use crate::core::storage::{DocumentStore, StoreQuery};
use crate::core::types::{Document, SearchHit};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

static INDEX_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("index name pattern is valid")
});

/// Check that `name` is usable as an index name
///
/// Names become directory names, so only ASCII letters, digits,
/// `_` and `-` are accepted (1 to 64 characters).
pub fn validate_index_name(name: &str) -> Result<()> {
    if INDEX_NAME.is_match(name) {
        Ok(())
    } else {
        Err(DocsiftError::InvalidIndexName(format!(
            "'{name}' (use 1-64 characters from A-Z, a-z, 0-9, '_' and '-')"
        )))
    }
}

/// Tuning knobs for [`TantivyStore`]
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub writer_heap_bytes: usize,
    pub commit_batch_size: usize,
    pub snippet_max_chars: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            writer_heap_bytes: 50 * 1024 * 1024,
            commit_batch_size: 100,
            snippet_max_chars: 150,
        }
    }
}

impl From<&Config> for StoreOptions {
    fn from(config: &Config) -> Self {
        Self {
            writer_heap_bytes: config.indexing.writer_heap_mb * 1024 * 1024,
            commit_batch_size: config.indexing.commit_batch_size,
            snippet_max_chars: config.search.snippet_max_chars,
        }
    }
}

/// Per-index metadata, stored as `meta.json` next to the index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_indexed_at: DateTime<Utc>,
    pub documents: u64,
    pub schema_version: u32,
}

/// Document store backed by one Tantivy index per name
pub struct TantivyStore {
    /// Root directory for all indices
    root: PathBuf,

    options: StoreOptions,

    /// Open handles by index name
    open: Mutex<HashMap<String, TantivyIndex>>,
}

impl TantivyStore {
    /// Create a store rooted at `root`
    pub fn new(root: PathBuf, options: StoreOptions) -> Self {
        Self {
            root,
            options,
            open: Mutex::new(HashMap::new()),
        }
    }

    /// Root directory for all indices
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn index_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn tantivy_dir(&self, name: &str) -> PathBuf {
        self.index_dir(name).join("tantivy")
    }

    fn metadata_path(&self, name: &str) -> PathBuf {
        self.index_dir(name).join("meta.json")
    }

    /// Check if an index exists on disk
    pub fn index_exists(&self, name: &str) -> bool {
        self.metadata_path(name).exists() && self.tantivy_dir(name).exists()
    }

    /// Get index metadata
    pub fn get_metadata(&self, name: &str) -> Result<IndexMetadata> {
        validate_index_name(name)?;
        let meta_path = self.metadata_path(name);

        if !meta_path.exists() {
            return Err(DocsiftError::IndexNotFound(name.to_string()));
        }

        let contents = fs::read_to_string(&meta_path)?;
        let metadata: IndexMetadata = serde_json::from_str(&contents)?;

        Ok(metadata)
    }

    fn write_metadata(&self, metadata: &IndexMetadata) -> Result<()> {
        let json = serde_json::to_string_pretty(metadata)?;
        fs::write(self.metadata_path(&metadata.name), json)?;
        Ok(())
    }

    /// Metadata for every index under the root, sorted by name
    pub fn list_metadata(&self) -> Result<Vec<IndexMetadata>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut indices = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if validate_index_name(name).is_err() {
                    continue;
                }
                match self.get_metadata(name) {
                    Ok(metadata) => indices.push(metadata),
                    Err(e) => tracing::debug!("Skipping {}: {}", name, e),
                }
            }
        }

        indices.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(indices)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, TantivyIndex>>> {
        self.open
            .lock()
            .map_err(|_| DocsiftError::StorageError("Index handle lock poisoned".to_string()))
    }

    /// Run `f` against the open handle for `name`
    ///
    /// With `create` set a missing index is created; otherwise a
    /// missing index is [`DocsiftError::IndexNotFound`].
    fn with_index<T>(
        &self,
        name: &str,
        create: bool,
        f: impl FnOnce(&mut TantivyIndex) -> Result<T>,
    ) -> Result<T> {
        validate_index_name(name)?;
        let mut open = self.lock()?;

        if !open.contains_key(name) {
            let index = if self.index_exists(name) {
                let metadata = self.get_metadata(name)?;
                if metadata.schema_version != SCHEMA_VERSION {
                    return Err(DocsiftError::StorageError(format!(
                        "Index '{}' uses schema version {} (current: v{}). Re-index into a new index.",
                        name, metadata.schema_version, SCHEMA_VERSION
                    )));
                }
                TantivyIndex::open(&self.tantivy_dir(name), self.options.writer_heap_bytes)?
            } else if create {
                self.create_index(name)?
            } else {
                return Err(DocsiftError::IndexNotFound(name.to_string()));
            };
            open.insert(name.to_string(), index);
        }

        match open.get_mut(name) {
            Some(index) => f(index),
            None => Err(DocsiftError::IndexNotFound(name.to_string())),
        }
    }

    fn create_index(&self, name: &str) -> Result<TantivyIndex> {
        fs::create_dir_all(self.index_dir(name))?;
        let tantivy_dir = self.tantivy_dir(name);

        // A Tantivy index without meta.json was left by an interrupted create
        let index = if tantivy_dir.join("meta.json").exists() {
            tracing::warn!("Recovering index '{}' with missing metadata", name);
            TantivyIndex::open(&tantivy_dir, self.options.writer_heap_bytes)?
        } else {
            TantivyIndex::create(&tantivy_dir, self.options.writer_heap_bytes)?
        };

        let now = Utc::now();
        self.write_metadata(&IndexMetadata {
            name: name.to_string(),
            created_at: now,
            last_indexed_at: now,
            documents: 0,
            schema_version: SCHEMA_VERSION,
        })?;

        tracing::info!("Created index '{}' at {:?}", name, self.index_dir(name));
        Ok(index)
    }

    fn commit(&self, name: &str, index: &mut TantivyIndex) -> Result<()> {
        index.commit()?;

        let mut metadata = self.get_metadata(name)?;
        metadata.last_indexed_at = Utc::now();
        metadata.documents = index.num_docs();
        self.write_metadata(&metadata)?;

        tracing::debug!("Committed index '{}' ({} documents)", name, metadata.documents);
        Ok(())
    }

    fn search_one(&self, name: &str, query: &StoreQuery) -> Result<Vec<SearchHit>> {
        let snippet_max_chars = self.options.snippet_max_chars;
        let hits = self.with_index(name, false, |index| {
            index.search(
                &query.query,
                &query.doc_type,
                &query.highlight_fields,
                query.limit,
                snippet_max_chars,
            )
        })?;

        Ok(hits
            .into_iter()
            .map(|(score, document, highlight)| SearchHit {
                index: name.to_string(),
                score,
                document,
                highlight,
            })
            .collect())
    }
}

impl DocumentStore for TantivyStore {
    fn create(&self, index: &str, doc_type: &str, document: &Document) -> Result<String> {
        let batch = self.options.commit_batch_size.max(1);
        self.with_index(index, true, |handle| {
            let id = handle.add_document(doc_type, document)?;
            if handle.pending() >= batch {
                self.commit(index, handle)?;
            }
            Ok(id)
        })
    }

    fn count_term(&self, index: &str, doc_type: &str, field: &str, value: &str) -> Result<u64> {
        self.with_index(index, false, |handle| {
            handle.count_term(doc_type, field, value)
        })
    }

    fn search(&self, query: &StoreQuery) -> Result<Vec<SearchHit>> {
        let names = if query.indices.is_empty() {
            self.list_indices()?
        } else {
            query.indices.clone()
        };

        let mut hits = Vec::new();
        for name in &names {
            hits.extend(self.search_one(name, query)?);
        }

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(query.limit);
        Ok(hits)
    }

    fn flush(&self, index: &str) -> Result<()> {
        self.with_index(index, false, |handle| {
            if handle.pending() > 0 {
                self.commit(index, handle)?;
            }
            Ok(())
        })
    }

    fn list_indices(&self) -> Result<Vec<String>> {
        Ok(self
            .list_metadata()?
            .into_iter()
            .map(|metadata| metadata.name)
            .collect())
    }
}
