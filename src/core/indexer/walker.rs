//! Recursive directory walker.
//!
//! Enumerates a path depth-first with `walkdir`, following symlinks,
//! and hands every regular file to a visitor. Directories are
//! identified by their canonical path and each canonical directory is
//! visited at most once per walk, so symlink cycles terminate. A
//! directory that cannot be canonicalized or listed abandons that
//! subtree only; siblings continue.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::core::error::{DocsiftError, Result};
use crate::core::indexer::AdmissionFilter;

/// Traversal counters for one walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Regular files handed to the visitor
    pub files_seen: usize,
    /// Subtrees abandoned because of traversal errors
    pub traversal_errors: usize,
    /// Directories skipped because they were already visited
    pub revisits_skipped: usize,
}

/// Depth-first walker over files and directories
pub struct DirectoryWalker {
    admission: AdmissionFilter,
}

impl DirectoryWalker {
    /// Create a walker; excluded directories are not entered
    pub fn new(admission: AdmissionFilter) -> Self {
        Self { admission }
    }

    /// Walk `root`, calling `visit` with the path of each regular file
    ///
    /// A missing `root` is nothing to do. A `root` that is a file is
    /// visited directly. Errors on `root` itself propagate. Visited
    /// paths are the canonical path of the containing directory
    /// joined with the file name.
    pub fn walk(&self, root: &Path, visit: &mut dyn FnMut(&Path)) -> Result<WalkSummary> {
        let mut summary = WalkSummary::default();

        if !root.exists() {
            tracing::info!("Path {:?} does not exist, nothing to index", root);
            return Ok(summary);
        }

        let canonical = fs::canonicalize(root).map_err(|e| {
            DocsiftError::InvalidPath(format!("Failed to canonicalize {root:?}: {e}"))
        })?;

        if canonical.is_file() {
            summary.files_seen += 1;
            visit(&canonical);
            return Ok(summary);
        }

        let mut visited: HashSet<PathBuf> = HashSet::new();
        // Canonical path of the directory currently open at each depth
        let mut open_dirs: Vec<PathBuf> = Vec::new();

        let mut entries = WalkDir::new(&canonical)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| self.should_enter(e));

        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.record_error(&e, &mut summary);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                let dir = match fs::canonicalize(entry.path()) {
                    Ok(dir) => dir,
                    Err(e) => {
                        tracing::warn!("Abandoning subtree {:?}: {}", entry.path(), e);
                        summary.traversal_errors += 1;
                        entries.skip_current_dir();
                        continue;
                    }
                };

                if !visited.insert(dir.clone()) {
                    tracing::debug!("Skipping already visited directory {:?}", dir);
                    summary.revisits_skipped += 1;
                    entries.skip_current_dir();
                    continue;
                }

                open_dirs.truncate(entry.depth());
                open_dirs.push(dir);
            } else if entry.file_type().is_file() {
                let path = match (entry.depth().checked_sub(1), entry.path().file_name()) {
                    (Some(parent), Some(name)) if parent < open_dirs.len() => {
                        open_dirs[parent].join(name)
                    }
                    _ => entry.path().to_path_buf(),
                };
                summary.files_seen += 1;
                visit(&path);
            }
        }

        Ok(summary)
    }

    /// Excluded directories below the root are not entered
    fn should_enter(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        if self.admission.is_excluded(entry.path()) {
            tracing::debug!("Skipping excluded directory {:?}", entry.path());
            return false;
        }
        true
    }

    fn record_error(&self, error: &walkdir::Error, summary: &mut WalkSummary) {
        if let Some(ancestor) = error.loop_ancestor() {
            tracing::debug!("Skipping symlink loop back to {:?}", ancestor);
            summary.revisits_skipped += 1;
            return;
        }

        // Only a directory that could not be listed costs a subtree
        let is_dir = error
            .path()
            .and_then(|path| fs::metadata(path).ok())
            .is_some_and(|metadata| metadata.is_dir());

        if is_dir {
            tracing::warn!("Abandoning subtree: {}", error);
            summary.traversal_errors += 1;
        } else {
            tracing::warn!("Skipping entry: {}", error);
        }
    }
}
