//! In-place rewrite of generated pages.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::services::LinkRewriter;
use crate::domain::entities::ImageRecord;
use crate::domain::errors::MirrorError;
use crate::domain::ports::PageStorePort;

/// Counts of one page rewrite pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Pages examined.
    pub scanned: usize,
    /// Pages written back with at least one replacement.
    pub updated: usize,
    /// Pages that could not be read or written.
    pub failed: usize,
    /// References replaced across all pages.
    pub replacements: usize,
}

/// Points every stored page at the local mirror.
pub struct RewritePagesUseCase {
    rewriter: LinkRewriter,
    pages: Arc<dyn PageStorePort>,
}

impl RewritePagesUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(rewriter: LinkRewriter, pages: Arc<dyn PageStorePort>) -> Self {
        Self { rewriter, pages }
    }

    /// Rewrites all pages against the variants present right now.
    ///
    /// The mirror is indexed once per call. Pages without replacements are
    /// not rewritten. A failing page is logged and skipped.
    ///
    /// # Errors
    /// Returns error if the pages cannot be listed.
    pub fn execute(&self, records: &[ImageRecord]) -> Result<RewriteSummary, MirrorError> {
        let mut summary = RewriteSummary::default();
        let pages = self.pages.list_pages()?;

        let index = self.rewriter.build_mirror_index(records);
        info!(
            pages = pages.len(),
            indexed_images = index.len(),
            "Rewriting image links"
        );

        for path in pages {
            summary.scanned += 1;

            let content = match self.pages.read_page(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to read page");
                    summary.failed += 1;
                    continue;
                }
            };

            let outcome = self.rewriter.rewrite_with_index(&content, &index);
            if !outcome.is_modified() {
                debug!(path = %path.display(), "Page needs no update");
                continue;
            }

            if let Err(e) = self.pages.write_page(&path, &outcome.text) {
                warn!(path = %path.display(), error = %e, "Failed to write page");
                summary.failed += 1;
                continue;
            }

            debug!(
                path = %path.display(),
                replacements = outcome.replacements,
                "Updated page"
            );
            summary.updated += 1;
            summary.replacements += outcome.replacements;
        }

        info!(
            scanned = summary.scanned,
            updated = summary.updated,
            failed = summary.failed,
            replacements = summary.replacements,
            "Image link rewrite complete"
        );

        Ok(summary)
    }
}
