//! Ports for mirroring records and probing mirrored variants.

use async_trait::async_trait;

use crate::domain::entities::{ImageRecord, VariantIndex};
use crate::domain::errors::MirrorError;

/// Port for downloading every resolution variant of one record.
#[async_trait]
pub trait VariantFetchPort: Send + Sync {
    /// Mirrors `record` and returns how many variants were written.
    ///
    /// Per-resolution failures are absorbed; only record-level failures
    /// (invalid input, unusable month directory) are returned.
    async fn fetch_variants(&self, record: &ImageRecord) -> Result<usize, MirrorError>;
}

/// Port for discovering which variants of a record exist locally.
///
/// Implementations must probe their storage on every call.
pub trait VariantIndexPort: Send + Sync {
    /// Builds the current variant index of `record`.
    fn build_index(&self, record: &ImageRecord) -> VariantIndex;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::entities::{ResolutionTag, VariantKey};
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    /// Variant fetcher that records calls and fails selected URLs.
    pub struct MockVariantFetcher {
        variants_per_record: usize,
        failing: Vec<String>,
        calls: RwLock<Vec<String>>,
    }

    impl MockVariantFetcher {
        /// Creates a fetcher reporting `variants_per_record` per success.
        pub fn new(variants_per_record: usize) -> Self {
            Self {
                variants_per_record,
                failing: Vec::new(),
                calls: RwLock::new(Vec::new()),
            }
        }

        /// Fails records whose URL equals `url`.
        pub fn failing_on(mut self, url: impl Into<String>) -> Self {
            self.failing.push(url.into());
            self
        }

        /// Returns URLs of records passed so far.
        pub async fn calls(&self) -> Vec<String> {
            self.calls.read().await.clone()
        }
    }

    #[async_trait]
    impl VariantFetchPort for MockVariantFetcher {
        async fn fetch_variants(&self, record: &ImageRecord) -> Result<usize, MirrorError> {
            self.calls
                .write()
                .await
                .push(record.remote_url().to_string());

            if self.failing.iter().any(|url| url == record.remote_url()) {
                return Err(MirrorError::CreateDir {
                    path: "mock".into(),
                    source: std::io::Error::other("mock failure"),
                });
            }
            Ok(self.variants_per_record)
        }
    }

    /// In-memory variant index keyed by identity.
    #[derive(Default)]
    pub struct MockVariantIndex {
        present: HashMap<String, Vec<ResolutionTag>>,
    }

    impl MockVariantIndex {
        /// Creates an index with no local files.
        pub fn new() -> Self {
            Self::default()
        }

        /// Marks `tags` of `identity` as present.
        pub fn with(mut self, identity: &str, tags: &[ResolutionTag]) -> Self {
            self.present
                .entry(identity.to_string())
                .or_default()
                .extend_from_slice(tags);
            self
        }
    }

    impl VariantIndexPort for MockVariantIndex {
        fn build_index(&self, record: &ImageRecord) -> VariantIndex {
            let key = VariantKey::for_record(record);
            let mut index = VariantIndex::new(key.clone());
            for tag in self.present.get(key.identity()).into_iter().flatten() {
                index.insert(
                    *tag,
                    format!("/local_img/{}/{}", key.year_month(), key.file_name(*tag)),
                );
            }
            index
        }
    }
}
