//! Plain-text family extractor (txt, java, c, cpp).

use super::TextExtractor;
use crate::core::error::{DocsiftError, Result};
use std::fs;
use std::path::Path;

/// Reads the whole file and decodes it as UTF-8
///
/// Content is taken verbatim: no normalization and no line-ending
/// translation. Invalid sequences become U+FFFD rather than failing
/// the file.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| {
            DocsiftError::ExtractionFailed(format!("Failed to read {path:?}: {e}"))
        })?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
