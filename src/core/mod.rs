//! Core domain logic (front-end agnostic)
//!
//! This module contains all indexing and search logic that is
//! independent of the command-line adapter.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **extract**: Format-aware text extraction
//! - **storage**: Document store trait and Tantivy-backed named indices
//! - **indexer**: Traversal, admission, dedup and submission pipeline
//! - **search**: Search gateway with optional highlighting
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod extract;
pub mod indexer;
pub mod search;
pub mod services;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{DocsiftError, Result};
pub use services::Services;
