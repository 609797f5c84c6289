//! Local mirror of remote wallpapers.
//!
//! This module provides:
//! - The date-partitioned directory layout
//! - Variant downloads into that layout
//! - Per-call indexing of what actually exists on disk

pub mod local_mirror;
pub mod variant_fetcher;
pub mod variant_index;

pub use local_mirror::{DEFAULT_MIRROR_ROOT, DEFAULT_WEB_PREFIX, LocalMirror, persist_atomically};
pub use variant_fetcher::VariantFetcher;
pub use variant_index::VariantIndexBuilder;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::application::services::LinkRewriter;
    use crate::domain::entities::{ImageRecord, ResolutionTag, VariantKey};
    use crate::domain::ports::VariantFetchPort;
    use crate::domain::ports::mocks::MockImageFetcher;
    use crate::domain::services::ResolutionPolicy;

    const URL: &str = "https://cn.bing.com/th?id=OHR.Test_EN-US1234567_UHD.jpg&pid=hp&w=1920";
    const BARE: &str = "https://cn.bing.com/th?id=OHR.Test_EN-US1234567_UHD.jpg";

    #[tokio::test]
    async fn test_fetched_variants_drive_rewrite_and_fallback() {
        let temp = TempDir::new().unwrap();
        let mirror = LocalMirror::new(temp.path().join("docs/local_img"), "/local_img");
        let fetcher = VariantFetcher::new(
            Arc::new(MockImageFetcher::serving(b"jpeg")),
            mirror.clone(),
        );
        let rewriter = LinkRewriter::new(
            Arc::new(VariantIndexBuilder::new(mirror.clone())),
            ResolutionPolicy::default(),
        );
        let record = ImageRecord::new("Test", "2024-03-15", URL);

        assert_eq!(fetcher.fetch_variants(&record).await.unwrap(), 3);

        let img = format!(r#"<img src="{URL}">"#);
        assert_eq!(
            rewriter.rewrite(&img, std::slice::from_ref(&record)),
            r#"<img src="/local_img/2024-03/OHR.Test_EN-US1234567_UHD_1920.jpg">"#
        );

        let key = VariantKey::for_record(&record);
        for tag in [ResolutionTag::W1920, ResolutionTag::Uhd] {
            std::fs::remove_file(mirror.variant_path(&key, tag)).unwrap();
        }

        let header = format!(r#"<header style="background-image: url('{BARE}')">"#);
        assert_eq!(
            rewriter.rewrite(&header, std::slice::from_ref(&record)),
            r#"<header style="background-image: url('/local_img/2024-03/OHR.Test_EN-US1234567_UHD_480.jpg')">"#
        );
    }

    #[tokio::test]
    async fn test_nothing_fetched_leaves_references_untouched() {
        let temp = TempDir::new().unwrap();
        let mirror = LocalMirror::new(temp.path().join("docs/local_img"), "/local_img");
        let fetcher = VariantFetcher::new(
            Arc::new(MockImageFetcher::serving(b"jpeg").failing_on("bing.com")),
            mirror.clone(),
        );
        let rewriter = LinkRewriter::new(
            Arc::new(VariantIndexBuilder::new(mirror)),
            ResolutionPolicy::default(),
        );
        let record = ImageRecord::new("Test", "2024-03-15", URL);

        assert_eq!(fetcher.fetch_variants(&record).await.unwrap(), 0);

        let img = format!(r#"<img src="{URL}">"#);
        assert_eq!(rewriter.rewrite(&img, &[record]), img);
    }
}
