//! Downloads every resolution variant of a record into the local mirror.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::local_mirror::LocalMirror;
use crate::domain::entities::{ImageRecord, ResolutionTag, VariantFile, VariantKey};
use crate::domain::errors::MirrorError;
use crate::domain::ports::{ImageFetchPort, VariantFetchPort};
use crate::infrastructure::http::variant_urls;

/// Mirrors records variant by variant, strictly one request at a time.
pub struct VariantFetcher {
    fetcher: Arc<dyn ImageFetchPort>,
    mirror: LocalMirror,
}

impl VariantFetcher {
    /// Creates a variant fetcher writing into `mirror`.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ImageFetchPort>, mirror: LocalMirror) -> Self {
        Self { fetcher, mirror }
    }

    async fn fetch_one(
        &self,
        key: &VariantKey,
        tag: ResolutionTag,
        url: &str,
    ) -> Result<VariantFile, MirrorError> {
        debug!(url = %url, tag = %tag, "Downloading variant");
        let bytes = self.fetcher.fetch(url).await?;
        self.mirror.write_variant(key, tag, bytes).await
    }
}

#[async_trait]
impl VariantFetchPort for VariantFetcher {
    async fn fetch_variants(&self, record: &ImageRecord) -> Result<usize, MirrorError> {
        let url = record.remote_url();
        if url.trim().is_empty() {
            warn!("Image URL is empty, nothing to download");
            return Err(MirrorError::invalid_record("empty remote URL"));
        }

        if !record.has_usable_date() {
            warn!(date = %record.date(), "Invalid image date, using current date");
        }

        let key = VariantKey::for_record(record);
        let month_dir = self.mirror.ensure_month_dir(&key).await?;

        info!(url = %url, identity = %key.identity(), "Processing image");

        let mut written = 0;
        for (tag, variant_url) in variant_urls(url) {
            match self.fetch_one(&key, tag, &variant_url).await {
                Ok(file) => {
                    debug!(path = %file.path.display(), tag = %file.resolution, "Variant mirrored");
                    written += 1;
                }
                Err(e) => {
                    warn!(url = %variant_url, tag = %tag, error = %e, "Skipping variant");
                }
            }
        }

        info!(
            identity = %key.identity(),
            dir = %month_dir.display(),
            written,
            "Mirrored image variants"
        );

        Ok(written)
    }
}
