//! Port definition for generated page storage.

use std::path::{Path, PathBuf};

use crate::domain::errors::MirrorError;

/// Port for enumerating, reading and replacing generated HTML pages.
pub trait PageStorePort: Send + Sync {
    /// Lists every page, in a stable order. A missing page root lists as
    /// empty.
    fn list_pages(&self) -> Result<Vec<PathBuf>, MirrorError>;

    /// Reads a page as UTF-8 text.
    fn read_page(&self, path: &Path) -> Result<String, MirrorError>;

    /// Replaces a page's content.
    fn write_page(&self, path: &Path, content: &str) -> Result<(), MirrorError>;
}
