//! Format-aware text extraction.
//!
//! A file's type comes from the final dot-separated suffix of its
//! name, compared case-insensitively against a fixed allow-list.
//! Each supported type maps to a [`TextExtractor`] through an
//! [`ExtractorRegistry`], so adding a format means registering a new
//! extractor rather than editing dispatch logic.
//!
//! Extractors open and release their own file handles; nothing
//! outlives a call to [`TextExtractor::extract`].

mod docx;
mod pdf;
mod plain;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use plain::PlainTextExtractor;

use crate::core::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Supported file types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Txt,
    Java,
    C,
    Cpp,
    Docx,
    Pdf,
}

impl FileType {
    /// Every supported type
    pub const ALL: [FileType; 6] = [
        FileType::Txt,
        FileType::Java,
        FileType::C,
        FileType::Cpp,
        FileType::Docx,
        FileType::Pdf,
    ];

    /// Get file type from a suffix (case-insensitive)
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "txt" => Some(FileType::Txt),
            "java" => Some(FileType::Java),
            "c" => Some(FileType::C),
            "cpp" => Some(FileType::Cpp),
            "docx" => Some(FileType::Docx),
            "pdf" => Some(FileType::Pdf),
            _ => None,
        }
    }

    /// Get file type from a file name's final dot-separated suffix
    ///
    /// Names without a dot have no suffix and are not supported.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, suffix) = name.rsplit_once('.')?;
        Self::from_suffix(suffix)
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Txt => "txt",
            FileType::Java => "java",
            FileType::C => "c",
            FileType::Cpp => "cpp",
            FileType::Docx => "docx",
            FileType::Pdf => "pdf",
        }
    }

    /// Whether the type is read as raw UTF-8 text
    pub fn is_plain_text(&self) -> bool {
        matches!(
            self,
            FileType::Txt | FileType::Java | FileType::C | FileType::Cpp
        )
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability to turn one file format into plain text
pub trait TextExtractor: Send + Sync {
    /// Extract the textual content of the file at `path`
    ///
    /// Failures are recoverable: callers index the file with empty
    /// content instead of aborting.
    fn extract(&self, path: &Path) -> Result<String>;
}

/// Lookup table from file type to extractor
pub struct ExtractorRegistry {
    extractors: HashMap<FileType, Box<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Register (or replace) the extractor for a file type
    pub fn register(&mut self, file_type: FileType, extractor: Box<dyn TextExtractor>) {
        self.extractors.insert(file_type, extractor);
    }

    /// Check whether a file type has an extractor
    pub fn supports(&self, file_type: FileType) -> bool {
        self.extractors.contains_key(&file_type)
    }

    /// Extract text from `path` using the extractor for `file_type`
    ///
    /// An unregistered type yields an empty string.
    pub fn extract(&self, path: &Path, file_type: FileType) -> Result<String> {
        match self.extractors.get(&file_type) {
            Some(extractor) => extractor.extract(path),
            None => Ok(String::new()),
        }
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for file_type in FileType::ALL {
            if file_type.is_plain_text() {
                registry.register(file_type, Box::new(PlainTextExtractor));
            }
        }
        registry.register(FileType::Docx, Box::new(DocxExtractor));
        registry.register(FileType::Pdf, Box::new(PdfExtractor));
        registry
    }
}
