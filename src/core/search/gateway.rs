//! Search gateway over the document store.
//!
//! Validates the request, fixes the document-type filter, chooses
//! the highlight fields and forwards the query string verbatim.

use crate::core::config::SearchConfig;
use crate::core::error::{DocsiftError, Result};
use crate::core::storage::{fields, validate_index_name, DocumentStore, StoreQuery};
use crate::core::types::{SearchRequest, SearchResponse, DOC_TYPE};
use std::sync::Arc;
use std::time::Instant;

/// Fields highlighted when highlighting is requested
pub const HIGHLIGHT_FIELDS: [&str; 3] = [fields::PATH, fields::TITLE, fields::CONTENT];

/// Search service
pub struct SearchGateway {
    store: Arc<dyn DocumentStore>,
    default_k: usize,
    max_k: usize,
    max_query_length: usize,
}

impl SearchGateway {
    /// Create a new search gateway
    pub fn new(store: Arc<dyn DocumentStore>, config: &SearchConfig) -> Self {
        Self {
            store,
            default_k: config.default_k,
            max_k: config.max_k,
            max_query_length: config.max_query_length,
        }
    }

    /// Execute a search request
    pub fn search(&self, request: SearchRequest) -> Result<SearchResponse> {
        self.search_index(
            &request.keyword,
            request.index.as_deref(),
            request.highlight,
            request.k,
        )
    }

    /// Execute a search with explicit parameters
    ///
    /// An absent or empty `index` searches every index. Query syntax
    /// errors and store failures are returned as errors, never as an
    /// empty hit list.
    pub fn search_index(
        &self,
        keyword: &str,
        index: Option<&str>,
        highlight: bool,
        k: Option<usize>,
    ) -> Result<SearchResponse> {
        let start = Instant::now();

        // Validate query
        if keyword.trim().is_empty() {
            return Err(DocsiftError::InvalidQuery(
                "Query cannot be empty".to_string(),
            ));
        }
        if keyword.chars().count() > self.max_query_length {
            return Err(DocsiftError::InvalidQuery(format!(
                "Query exceeds {} characters",
                self.max_query_length
            )));
        }

        let indices = match index.filter(|name| !name.is_empty()) {
            Some(name) => {
                validate_index_name(name)?;
                vec![name.to_string()]
            }
            None => Vec::new(),
        };

        let highlight_fields = if highlight {
            HIGHLIGHT_FIELDS.iter().map(|f| f.to_string()).collect()
        } else {
            Vec::new()
        };

        // Determine k (result limit)
        let limit = k.unwrap_or(self.default_k).min(self.max_k).max(1);

        let query = StoreQuery {
            query: keyword.to_string(),
            indices,
            doc_type: DOC_TYPE.to_string(),
            highlight_fields,
            limit,
        };

        let hits = self.store.search(&query).map_err(|e| {
            tracing::warn!("Search for '{}' failed: {}", keyword, e);
            e
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let count = hits.len();

        tracing::debug!(
            "Search '{}' returned {} hits in {}ms",
            keyword,
            count,
            duration_ms
        );

        Ok(SearchResponse {
            query: keyword.to_string(),
            hits,
            count,
            duration_ms,
        })
    }
}
