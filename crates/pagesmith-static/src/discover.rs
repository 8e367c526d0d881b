//! Page discovery.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// Rules for which directories count as pages.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// File that marks a directory as a page
    pub source_file: String,

    /// Per-page output subdirectory, never descended into
    pub output_dir: String,

    /// Directories starting with this prefix hold tooling and partials
    pub reserved_prefix: String,

    /// Directory names skipped wherever they appear
    pub exclude: Vec<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            source_file: "code.html".to_string(),
            output_dir: "dist".to_string(),
            reserved_prefix: "_".to_string(),
            exclude: vec!["node_modules".to_string()],
        }
    }
}

/// A content page found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    /// Page directory relative to the content root
    pub relative_dir: PathBuf,

    /// Absolute path of the source fragment
    pub source_path: PathBuf,
}

impl PageRef {
    /// Page identifier: the relative directory with `/` separators.
    pub fn id(&self) -> String {
        path_id(&self.relative_dir)
    }
}

/// Find every page directory under `root`.
///
/// Recurses through nested category directories. Pages come back sorted by
/// relative path with no duplicates. The root itself is never a page.
pub fn discover_pages(root: &Path, options: &DiscoveryOptions) -> Vec<PageRef> {
    let mut pages = BTreeMap::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry, options));

    for entry in walker.filter_map(|e| e.ok()) {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            continue;
        }

        let source_path = entry.path().join(&options.source_file);
        if !source_path.is_file() {
            continue;
        }

        let relative_dir = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();

        let page = PageRef {
            relative_dir,
            source_path,
        };
        tracing::debug!("Discovered page {}", page.id());
        pages.entry(page.id()).or_insert(page);
    }

    pages.into_values().collect()
}

/// Whether a directory entry is pruned from the walk.
fn is_excluded(entry: &DirEntry, options: &DiscoveryOptions) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();

    name.starts_with('.')
        || (!options.reserved_prefix.is_empty() && name.starts_with(&options.reserved_prefix))
        || name == options.output_dir
        || options.exclude.iter().any(|excluded| name == excluded.as_str())
}

/// Join path components with `/`.
pub(crate) fn path_id(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
