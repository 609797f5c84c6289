//! Locally mirrored variants and the per-pass index over them.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use super::image_record::ImageRecord;
use super::resolution::ResolutionTag;
use crate::domain::services::extract_identity;

/// Where a record's variants live: its identity and year-month partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantKey {
    identity: String,
    year_month: String,
}

impl VariantKey {
    /// Derives the key for a record. Records without a usable date are
    /// partitioned under today's month.
    #[must_use]
    pub fn for_record(record: &ImageRecord) -> Self {
        let date = record.effective_date();
        let year_month = date[..7].to_string();

        let mut identity = Self::identity_for_url(record.remote_url());
        if identity.is_empty() {
            identity = format!("bing_{}", date.replace('-', ""));
        }

        Self {
            identity,
            year_month,
        }
    }

    /// Returns the identity of `url` as used in file names. Path separators
    /// are replaced so an identity always names a single file.
    #[must_use]
    pub fn identity_for_url(url: &str) -> String {
        extract_identity(url).replace(['/', '\\'], "_")
    }

    /// Creates a key from already derived parts.
    #[must_use]
    pub fn new(identity: impl Into<String>, year_month: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            year_month: year_month.into(),
        }
    }

    /// Returns the image identity.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Returns the `YYYY-MM` partition.
    #[must_use]
    pub fn year_month(&self) -> &str {
        &self.year_month
    }

    /// Returns the canonical file name of one variant.
    #[must_use]
    pub fn file_name(&self, tag: ResolutionTag) -> String {
        format!("{}_{}.jpg", self.identity, tag.as_str())
    }

    /// Returns the prefix used to recognize renamed files when scanning.
    #[must_use]
    pub fn scan_prefix(&self) -> &str {
        self.identity
            .char_indices()
            .nth(10)
            .map_or(self.identity.as_str(), |(idx, _)| &self.identity[..idx])
    }
}

/// A variant written to disk by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantFile {
    /// Image identity.
    pub identity: String,
    /// Variant written.
    pub resolution: ResolutionTag,
    /// `YYYY-MM` partition.
    pub year_month: String,
    /// Absolute (or mirror-root relative) location.
    pub path: PathBuf,
}

/// Variants of one image that exist locally, keyed by tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantIndex {
    key: VariantKey,
    variants: BTreeMap<ResolutionTag, String>,
}

impl VariantIndex {
    /// Creates an empty index for `key`.
    #[must_use]
    pub fn new(key: VariantKey) -> Self {
        Self {
            key,
            variants: BTreeMap::new(),
        }
    }

    /// Returns the identity the index was built for.
    #[must_use]
    pub fn identity(&self) -> &str {
        self.key.identity()
    }

    /// Records a web path for `tag`. Existing entries are kept.
    pub fn insert(&mut self, tag: ResolutionTag, web_path: String) {
        self.variants.entry(tag).or_insert(web_path);
    }

    /// Returns the web path of `tag`, if present.
    #[must_use]
    pub fn get(&self, tag: ResolutionTag) -> Option<&str> {
        self.variants.get(&tag).map(String::as_str)
    }

    /// Returns true if no variant exists locally.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Returns the number of local variants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Resolves `desired` through its fallback ring.
    #[must_use]
    pub fn resolve(&self, desired: ResolutionTag) -> Option<(ResolutionTag, &str)> {
        desired
            .fallback_ring()
            .into_iter()
            .find_map(|tag| self.get(tag).map(|path| (tag, path)))
    }
}

/// Non-empty variant indexes of one rewrite pass, keyed by identity.
#[derive(Debug, Default, Clone)]
pub struct MirrorIndex {
    entries: HashMap<String, VariantIndex>,
}

impl MirrorIndex {
    /// Creates an empty mirror index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an index. Empty indexes are ignored, and an identity already
    /// present keeps its first index.
    pub fn insert(&mut self, index: VariantIndex) {
        if index.is_empty() {
            return;
        }
        self.entries
            .entry(index.identity().to_string())
            .or_insert(index);
    }

    /// Returns the index of `identity`.
    #[must_use]
    pub fn get(&self, identity: &str) -> Option<&VariantIndex> {
        self.entries.get(identity)
    }

    /// Returns the number of indexed images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no image has local variants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<VariantIndex> for MirrorIndex {
    fn from_iter<I: IntoIterator<Item = VariantIndex>>(iter: I) -> Self {
        let mut index = Self::new();
        for entry in iter {
            index.insert(entry);
        }
        index
    }
}
