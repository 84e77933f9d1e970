//! Target discovery: expands root paths into the ordered, duplicate-free
//! list of candidate files the engine consumes.

use crate::error::{EolError, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions selected by default when no explicit filter is given.
///
/// Content-level binary detection still guards every selected file; this
/// list only keeps the walker away from obviously non-text artifacts.
const TEXT_EXTENSIONS: &[&str] = &[
    "bash", "c", "cfg", "conf", "cpp", "cs", "css", "csv", "env", "go", "h", "hpp", "html", "ini",
    "java", "js", "json", "jsx", "md", "php", "pl", "ps1", "py", "rb", "rs", "sh", "sql", "svg",
    "toml", "ts", "tsx", "txt", "xml", "yaml", "yml", "zsh",
];

/// File names without an extension that are still text.
const TEXT_FILE_NAMES: &[&str] = &[
    "Dockerfile",
    "dockerfile",
    "Makefile",
    "makefile",
    "README",
    "LICENSE",
    "CHANGELOG",
];

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkConfig {
    /// Explicit extension filter; empty means "use the text-file heuristic".
    pub extensions: Vec<String>,
    /// Select every file regardless of extension.
    pub all_files: bool,
    /// Maximum depth to traverse. None means unlimited.
    pub max_depth: Option<usize>,
    /// Whether to follow symbolic links.
    pub follow_symlinks: bool,
}

impl WalkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit extension filter (matched case-insensitively).
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Select every file, skipping the text-file heuristic.
    pub fn with_all_files(mut self, all: bool) -> Self {
        self.all_files = all;
        self
    }

    /// Set maximum traversal depth.
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set whether to follow symlinks.
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    fn selects(&self, path: &Path) -> bool {
        if self.all_files {
            return true;
        }
        if !self.extensions.is_empty() {
            return path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| {
                    let ext = ext.to_lowercase();
                    self.extensions.iter().any(|e| *e == ext)
                });
        }
        is_text_file(path)
    }
}

/// Check if a path looks like a text file by extension or well-known name.
pub fn is_text_file(path: &Path) -> bool {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        let ext = ext.to_lowercase();
        return TEXT_EXTENSIONS.contains(&ext.as_str());
    }

    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        if TEXT_FILE_NAMES.contains(&name) {
            return true;
        }
        // Dotfiles and *rc files are almost always configuration text
        if name.starts_with('.') || name.to_lowercase().ends_with("rc") {
            return true;
        }
    }

    false
}

/// Walker that expands root paths into candidate files.
pub struct DirectoryWalker {
    config: WalkConfig,
}

impl DirectoryWalker {
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    /// Expand the given roots into a sorted, duplicate-free file list.
    ///
    /// Roots may be files or directories. A root that does not exist is a
    /// validation error and fails the whole call before any scanning starts;
    /// a file root is always selected, bypassing the extension filter (the
    /// caller named it deliberately).
    pub fn collect(&self, roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
        if roots.is_empty() {
            return Err(EolError::NoInput);
        }

        let mut files = BTreeSet::new();

        for root in roots {
            if !root.exists() {
                return Err(EolError::TargetNotFound(root.display().to_string()));
            }

            if root.is_file() {
                files.insert(root.clone());
                continue;
            }

            let mut walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);
            if let Some(depth) = self.config.max_depth {
                walker = walker.max_depth(depth);
            }

            for entry in walker
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter(|e| self.config.selects(e.path()))
            {
                files.insert(entry.into_path());
            }
        }

        Ok(files.into_iter().collect())
    }
}
