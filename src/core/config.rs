//! Configuration management for docsift.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{DocsiftError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Indexing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// Maximum file size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,

    /// Documents created between automatic commits
    #[serde(default = "default_commit_batch_size")]
    pub commit_batch_size: usize,

    /// Index writer memory budget in MB
    #[serde(default = "default_writer_heap_mb")]
    pub writer_heap_mb: usize,

    /// Paths to skip during traversal (glob syntax)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory for index storage
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Default number of hits to return
    #[serde(default = "default_k")]
    pub default_k: usize,

    /// Maximum hits per query
    #[serde(default = "default_max_k")]
    pub max_k: usize,

    /// Maximum query string length
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,

    /// Maximum characters per highlight fragment
    #[serde(default = "default_snippet_max_chars")]
    pub snippet_max_chars: usize,
}

// Default value functions
fn default_max_file_size() -> usize {
    100
}

fn default_commit_batch_size() -> usize {
    100
}

fn default_writer_heap_mb() -> usize {
    50
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_k() -> usize {
    10
}

fn default_max_k() -> usize {
    100
}

fn default_max_query_length() -> usize {
    500
}

fn default_snippet_max_chars() -> usize {
    150
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: default_max_file_size(),
            commit_batch_size: default_commit_batch_size(),
            writer_heap_mb: default_writer_heap_mb(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            index_dir: default_index_dir(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_k: default_k(),
            max_k: default_max_k(),
            max_query_length: default_max_query_length(),
            snippet_max_chars: default_snippet_max_chars(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| DocsiftError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. DOCSIFT_CONFIG env var
    /// 2. XDG config file (~/.config/docsift/config.toml)
    /// 3. ./docsift.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("DOCSIFT_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("docsift.toml").exists() {
                Self::from_file("docsift.toml")?
            } else {
                Self::default()
            }
        };

        // Use the XDG data directory unless a location was given explicitly
        if env::var("DOCSIFT_DATA_DIR").is_err() && config.storage.index_dir == default_index_dir()
        {
            config.storage.index_dir = xdg.indices_dir();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Indexing configuration
        if let Ok(max_size) = env::var("DOCSIFT_MAX_FILE_SIZE_MB") {
            if let Ok(size) = max_size.parse() {
                self.indexing.max_file_size_mb = size;
            }
        }
        if let Ok(batch) = env::var("DOCSIFT_COMMIT_BATCH_SIZE") {
            if let Ok(b) = batch.parse() {
                self.indexing.commit_batch_size = b;
            }
        }

        // Storage configuration
        if let Ok(data_dir) = env::var("DOCSIFT_DATA_DIR") {
            self.storage.index_dir = PathBuf::from(data_dir).join("indices");
        }

        // Search configuration
        if let Ok(default_k) = env::var("DOCSIFT_DEFAULT_K") {
            if let Ok(k) = default_k.parse() {
                self.search.default_k = k;
            }
        }
        if let Ok(max_k) = env::var("DOCSIFT_MAX_K") {
            if let Ok(k) = max_k.parse() {
                self.search.max_k = k;
            }
        }
        if let Ok(max_query_len) = env::var("DOCSIFT_MAX_QUERY_LENGTH") {
            if let Ok(len) = max_query_len.parse() {
                self.search.max_query_length = len;
            }
        }
        if let Ok(chars) = env::var("DOCSIFT_SNIPPET_MAX_CHARS") {
            if let Ok(c) = chars.parse() {
                self.search.snippet_max_chars = c;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.indexing.max_file_size_mb == 0 {
            return Err(DocsiftError::ConfigError(
                "Max file size must be non-zero".to_string(),
            ));
        }

        if self.indexing.commit_batch_size == 0 {
            return Err(DocsiftError::ConfigError(
                "Commit batch size must be non-zero".to_string(),
            ));
        }

        // Tantivy refuses writer budgets below 15MB
        if self.indexing.writer_heap_mb < 15 {
            return Err(DocsiftError::ConfigError(
                "Writer heap must be at least 15 MB".to_string(),
            ));
        }

        for pattern in &self.indexing.exclude_patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                DocsiftError::ConfigError(format!("Invalid exclude pattern '{pattern}': {e}"))
            })?;
        }

        if self.search.default_k == 0 {
            return Err(DocsiftError::ConfigError(
                "Default k must be non-zero".to_string(),
            ));
        }

        if self.search.default_k > self.search.max_k {
            return Err(DocsiftError::ConfigError(
                "Default k cannot exceed max k".to_string(),
            ));
        }

        if self.search.max_query_length == 0 {
            return Err(DocsiftError::ConfigError(
                "Max query length must be non-zero".to_string(),
            ));
        }

        if self.search.snippet_max_chars == 0 {
            return Err(DocsiftError::ConfigError(
                "Snippet length must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Max file size: {} MB", self.indexing.max_file_size_mb);
        tracing::info!("  Commit batch size: {}", self.indexing.commit_batch_size);
        tracing::info!("  Writer heap: {} MB", self.indexing.writer_heap_mb);
        tracing::info!(
            "  Exclude patterns: {} patterns",
            self.indexing.exclude_patterns.len()
        );
        tracing::info!("  Index dir: {:?}", self.storage.index_dir);
        tracing::info!("  Default k: {}", self.search.default_k);
        tracing::info!("  Max k: {}", self.search.max_k);
        tracing::info!("  Max query length: {}", self.search.max_query_length);
        tracing::info!("  Snippet max chars: {}", self.search.snippet_max_chars);
    }
}
