//! Rebuilds which variants of a record exist in the local mirror.

use tracing::{debug, trace};

use super::local_mirror::LocalMirror;
use crate::domain::entities::{ImageRecord, ResolutionTag, VariantIndex, VariantKey};
use crate::domain::ports::VariantIndexPort;

/// Probes the mirror on every call. Canonical file names are checked first;
/// only when none exists is the month directory scanned for renamed files.
#[derive(Debug, Clone)]
pub struct VariantIndexBuilder {
    mirror: LocalMirror,
}

impl VariantIndexBuilder {
    /// Creates an index builder over `mirror`.
    #[must_use]
    pub fn new(mirror: LocalMirror) -> Self {
        Self { mirror }
    }

    fn scan_fallback(&self, key: &VariantKey, index: &mut VariantIndex) {
        let prefix = key.scan_prefix();

        for name in self.mirror.scan_month(key) {
            if !name.contains(prefix) {
                continue;
            }
            let tag = ResolutionTag::infer_from_file_name(&name);
            trace!(file = %name, tag = %tag, "Matched variant by directory scan");
            index.insert(tag, self.mirror.web_path(key, &name));
        }
    }
}

impl VariantIndexPort for VariantIndexBuilder {
    fn build_index(&self, record: &ImageRecord) -> VariantIndex {
        let key = VariantKey::for_record(record);
        let mut index = VariantIndex::new(key.clone());

        for tag in ResolutionTag::INDEXED {
            if self.mirror.contains(&key, tag) {
                index.insert(tag, self.mirror.web_path(&key, &key.file_name(tag)));
            }
        }

        if index.is_empty() {
            self.scan_fallback(&key, &mut index);
        }

        debug!(
            identity = %key.identity(),
            variants = index.len(),
            "Built variant index"
        );
        index
    }
}
