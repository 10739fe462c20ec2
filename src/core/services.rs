//! Unified service container for docsift
//!
//! Provides shared access to all core services.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::indexer::IndexingPipeline;
use crate::core::search::SearchGateway;
use crate::core::storage::{DocumentStore, StoreOptions, TantivyStore};
use crate::core::types::{IndexStats, SearchResponse};
use std::path::Path;
use std::sync::Arc;

/// Unified services container
///
/// All adapters use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Tantivy-backed store managing named indices
    pub store: Arc<TantivyStore>,

    /// Indexing pipeline (owns the per-fingerprint claim set)
    pub pipeline: Arc<IndexingPipeline>,

    /// Search gateway
    pub search: Arc<SearchGateway>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Result<Self> {
        let store = Arc::new(TantivyStore::new(
            config.storage.index_dir.clone(),
            StoreOptions::from(&config),
        ));
        let shared: Arc<dyn DocumentStore> = store.clone();

        let pipeline = Arc::new(IndexingPipeline::from_config(Arc::clone(&shared), &config)?);
        let search = Arc::new(SearchGateway::new(shared, &config.search));

        Ok(Self {
            store,
            pipeline,
            search,
            config: Arc::new(config),
        })
    }

    /// Recursively index `path` into `index`
    pub fn index_path(&self, path: &Path, index: &str) -> Result<IndexStats> {
        self.pipeline.index_path(path, index)
    }

    /// Search `index` (all indices when absent or empty)
    pub fn search(
        &self,
        keyword: &str,
        index: Option<&str>,
        highlight: bool,
        k: Option<usize>,
    ) -> Result<SearchResponse> {
        self.search.search_index(keyword, index, highlight, k)
    }
}
