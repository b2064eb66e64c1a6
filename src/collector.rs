//! File discovery for a bundle run.
//!
//! Walks the root directory recursively, drops anything under the conventional
//! build-output folders, then applies the language's extension filter.

use crate::error::BundleResult;
use crate::language::LanguageFilter;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Directory names whose contents never take part in a bundle.
///
/// Matched as `<sep>name<sep>` substrings of the walked path, case-sensitively.
pub const EXCLUDED_DIR_MARKERS: [&str; 2] = ["bin", "obj"];

/// A file selected for bundling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path as produced by the directory walk (root joined with the relative part).
    pub path: PathBuf,
    /// Path relative to the walk root.
    pub relative: PathBuf,
    /// Lowercased extension including the leading dot, or empty if there is none.
    pub extension: String,
}

impl FileEntry {
    /// Builds an entry for `path`, found while walking `root`.
    pub fn new(root: &Path, path: PathBuf) -> Self {
        let relative = path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        Self {
            path,
            relative,
            extension,
        }
    }
}

/// Collects the files that take part in a bundle.
pub struct Collector<'a> {
    root: &'a Path,
    filter: LanguageFilter,
    markers: Vec<String>,
    skip: Vec<PathBuf>,
}

impl<'a> Collector<'a> {
    /// Creates a collector rooted at `root` using the given extension filter.
    pub fn new(root: &'a Path, filter: LanguageFilter) -> Self {
        let markers = EXCLUDED_DIR_MARKERS
            .iter()
            .map(|name| format!("{MAIN_SEPARATOR}{name}{MAIN_SEPARATOR}"))
            .collect();
        Self {
            root,
            filter,
            markers,
            skip: Vec::new(),
        }
    }

    /// Never collect `path`, such as the bundle's own output or a defaults file.
    ///
    /// Has no effect if `path` does not exist yet. May be called repeatedly.
    pub fn skipping(mut self, path: &Path) -> Self {
        if let Ok(canonical) = path.canonicalize() {
            self.skip.push(canonical);
        }
        self
    }

    /// Returns true if the path lies under one of the excluded directories.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.markers.iter().any(|marker| text.contains(marker.as_str()))
    }

    /// Walks the tree and returns the matching files in walk order.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::BundleError::Walk`] if the root or any directory below it
    /// cannot be read.
    pub fn collect(&self) -> BundleResult<Vec<FileEntry>> {
        let mut entries = Vec::new();
        let mut seen = 0usize;

        for entry in WalkDir::new(self.root) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            seen += 1;

            let path = entry.into_path();
            if self.is_excluded(&path) || self.is_skipped(&path) {
                continue;
            }

            let file = FileEntry::new(self.root, path);
            if self.filter.accepts(&file.extension) {
                entries.push(file);
            } else {
                debug!(path = %file.relative.display(), "extension filtered out");
            }
        }

        info!(
            root = %self.root.display(),
            seen,
            selected = entries.len(),
            "collected files"
        );
        Ok(entries)
    }

    fn is_skipped(&self, path: &Path) -> bool {
        self.skip.iter().any(|skip| {
            path.file_name() == skip.file_name()
                && path.canonicalize().is_ok_and(|canonical| &canonical == skip)
        })
    }
}
