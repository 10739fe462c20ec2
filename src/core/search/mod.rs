//! Search module for full-text queries over named indices.
//!
//! The gateway forwards query strings verbatim in the store's native
//! syntax, restricted to the fixed document type, with optional
//! highlighting of path, title and content.

mod gateway;

pub use gateway::{SearchGateway, HIGHLIGHT_FIELDS};
