//! Batch mirroring of the most recent wallpapers.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::ImageRecord;
use crate::domain::ports::VariantFetchPort;

/// Default number of records mirrored per run.
pub const DEFAULT_MAX_IMAGES: usize = 10;

/// Counts of one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorSummary {
    /// Records processed without a record-level error.
    pub mirrored: usize,
    /// Records skipped for missing URL or date.
    pub skipped: usize,
    /// Records that failed as a whole.
    pub failed: usize,
    /// Variant files written across all records.
    pub variants: usize,
}

/// Mirrors records in order until the batch cap is reached.
pub struct MirrorImagesUseCase {
    fetch_port: Arc<dyn VariantFetchPort>,
    max_images: usize,
}

impl MirrorImagesUseCase {
    /// Creates new use case.
    #[must_use]
    pub fn new(fetch_port: Arc<dyn VariantFetchPort>, max_images: usize) -> Self {
        Self {
            fetch_port,
            max_images,
        }
    }

    /// Mirrors up to `max_images` records, one after another.
    ///
    /// Invalid and failed records do not count toward the cap. Failures are
    /// logged and never stop the batch.
    pub async fn execute(&self, records: &[ImageRecord]) -> MirrorSummary {
        let mut summary = MirrorSummary::default();

        if records.is_empty() {
            info!("Image list is empty, nothing to mirror");
            return summary;
        }

        info!(
            records = records.len(),
            max_images = self.max_images,
            "Starting mirror pass"
        );

        for record in records {
            if summary.mirrored >= self.max_images {
                break;
            }

            if record.remote_url().trim().is_empty() || record.date().trim().is_empty() {
                warn!(
                    url = %record.remote_url(),
                    date = %record.date(),
                    "Skipping invalid image record"
                );
                summary.skipped += 1;
                continue;
            }

            match self.fetch_port.fetch_variants(record).await {
                Ok(written) => {
                    summary.mirrored += 1;
                    summary.variants += written;
                }
                Err(e) => {
                    warn!(url = %record.remote_url(), error = %e, "Failed to mirror image");
                    summary.failed += 1;
                }
            }
        }

        info!(
            mirrored = summary.mirrored,
            skipped = summary.skipped,
            failed = summary.failed,
            variants = summary.variants,
            "Mirror pass complete"
        );

        summary
    }
}
