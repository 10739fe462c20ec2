//! File admission filter.
//!
//! Decides, from the file name alone, whether a file enters the
//! per-file pipeline and with which [`FileType`].

use glob::Pattern;
use std::path::Path;

use crate::core::error::{DocsiftError, Result};
use crate::core::extract::FileType;

/// Name prefix office suites use for transient lock files
pub const LOCK_FILE_PREFIX: &str = "~$";

/// Verdict for a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Process the file as this type
    Accept(FileType),
    /// Transient office lock file
    LockFile,
    /// Suffix outside the allow-list (or no suffix)
    Unsupported,
    /// Matched a configured exclude pattern
    Excluded,
}

/// Lock-file, allow-list and exclude-pattern filter
#[derive(Debug, Clone, Default)]
pub struct AdmissionFilter {
    exclude_patterns: Vec<Pattern>,
}

impl AdmissionFilter {
    /// Create a filter with optional glob exclude patterns
    pub fn new(exclude_patterns: &[String]) -> Result<Self> {
        let exclude_patterns = exclude_patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    DocsiftError::ConfigError(format!("Invalid exclude pattern '{p}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { exclude_patterns })
    }

    /// Whether `path` (file or directory) matches an exclude pattern
    ///
    /// Patterns are tried against the full path and the bare name.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let name = path.file_name().and_then(|n| n.to_str());
        self.exclude_patterns
            .iter()
            .any(|p| p.matches_path(path) || name.map(|n| p.matches(n)).unwrap_or(false))
    }

    /// Classify a regular file
    pub fn admit(&self, path: &Path) -> Admission {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return Admission::Unsupported,
        };

        if name.starts_with(LOCK_FILE_PREFIX) {
            return Admission::LockFile;
        }

        let file_type = match FileType::from_file_name(&name) {
            Some(file_type) => file_type,
            None => return Admission::Unsupported,
        };

        if self.is_excluded(path) {
            return Admission::Excluded;
        }

        Admission::Accept(file_type)
    }
}
