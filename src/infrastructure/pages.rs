//! HTML pages of the generated site.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use super::mirror::persist_atomically;
use crate::domain::errors::MirrorError;
use crate::domain::ports::PageStorePort;

const PAGE_EXTENSION: &str = "html";

/// Every `.html` file below a root directory, at any depth.
#[derive(Debug, Clone)]
pub struct HtmlPageStore {
    root: PathBuf,
}

impl HtmlPageStore {
    /// Creates a store over `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PageStorePort for HtmlPageStore {
    fn list_pages(&self) -> Result<Vec<PathBuf>, MirrorError> {
        if !self.root.is_dir() {
            warn!(
                path = %self.root.display(),
                "Page directory does not exist or is not a directory"
            );
            return Ok(Vec::new());
        }

        let pages = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable directory entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == PAGE_EXTENSION)
            })
            .map(walkdir::DirEntry::into_path)
            .collect();

        Ok(pages)
    }

    fn read_page(&self, path: &Path) -> Result<String, MirrorError> {
        std::fs::read_to_string(path).map_err(|source| MirrorError::ReadFile {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_page(&self, path: &Path, content: &str) -> Result<(), MirrorError> {
        let parent = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        persist_atomically(parent, path, content.as_bytes()).map_err(|source| {
            MirrorError::WriteFile {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}
