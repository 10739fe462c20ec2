//! Error types and error handling for docsift.
//!
//! This module defines the error types used throughout the
//! crate. Per-file indexing failures are recoverable and are
//! logged by the pipeline; everything else propagates through
//! [`Result`].

use thiserror::Error;

/// Result type alias for docsift operations
pub type Result<T> = std::result::Result<T, DocsiftError>;

/// Main error type for docsift
#[derive(Error, Debug)]
pub enum DocsiftError {
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    #[error("Invalid index name: {0}")]
    InvalidIndexName(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Indexing failed: {0}")]
    IndexingFailed(String),

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl DocsiftError {
    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DocsiftError::IndexNotFound(_) | DocsiftError::InvalidPath(_)
        )
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            DocsiftError::InvalidIndexName(_)
                | DocsiftError::InvalidQuery(_)
                | DocsiftError::ConfigError(_)
        )
    }
}
