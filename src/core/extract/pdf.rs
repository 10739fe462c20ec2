//! Paged document (pdf) extractor.

use super::TextExtractor;
use crate::core::error::{DocsiftError, Result};
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// Extracts text from PDF files, pages concatenated in page order
///
/// The parser can panic on malformed input; the panic is contained
/// here and reported as a recoverable extraction error.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| {
            DocsiftError::ExtractionFailed(format!("Failed to read PDF file {path:?}: {e}"))
        })?;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(&bytes)
        }));

        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(DocsiftError::ExtractionFailed(format!(
                "Failed to extract text from PDF {path:?}: {e}"
            ))),
            Err(_) => Err(DocsiftError::ExtractionFailed(format!(
                "PDF parser panicked on {path:?}"
            ))),
        }
    }
}
