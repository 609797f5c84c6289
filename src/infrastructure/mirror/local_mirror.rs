//! Date-partitioned on-disk layout of mirrored variants.
//!
//! ```text
//! <root>/<YYYY-MM>/<identity>_<tag>.jpg   served as   <web_prefix>/<YYYY-MM>/<identity>_<tag>.jpg
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::entities::{ResolutionTag, VariantFile, VariantKey};
use crate::domain::errors::MirrorError;

/// Default mirror root, relative to the site checkout.
pub const DEFAULT_MIRROR_ROOT: &str = "docs/local_img";

/// Default URL prefix under which the mirror root is served.
pub const DEFAULT_WEB_PREFIX: &str = "/local_img";

const VARIANT_EXTENSION: &str = "jpg";

/// Local mirror directory. Files on disk are the only record of what was
/// mirrored; nothing is cached in memory.
#[derive(Debug, Clone)]
pub struct LocalMirror {
    root: PathBuf,
    web_prefix: String,
}

impl LocalMirror {
    /// Creates a mirror rooted at `root`, served under `web_prefix`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, web_prefix: impl Into<String>) -> Self {
        let web_prefix = web_prefix.into();
        Self {
            root: root.into(),
            web_prefix: web_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a mirror at `docs/local_img` served under `/local_img`.
    #[must_use]
    pub fn default_location() -> Self {
        Self::new(DEFAULT_MIRROR_ROOT, DEFAULT_WEB_PREFIX)
    }

    /// Returns the directory holding the variants of `key`'s month.
    #[must_use]
    pub fn month_dir(&self, key: &VariantKey) -> PathBuf {
        self.root.join(key.year_month())
    }

    /// Returns the canonical path of one variant.
    #[must_use]
    pub fn variant_path(&self, key: &VariantKey, tag: ResolutionTag) -> PathBuf {
        self.month_dir(key).join(key.file_name(tag))
    }

    /// Returns the web path of a file in `key`'s month directory.
    #[must_use]
    pub fn web_path(&self, key: &VariantKey, file_name: &str) -> String {
        format!("{}/{}/{file_name}", self.web_prefix, key.year_month())
    }

    /// Creates the month directory of `key` if absent.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn ensure_month_dir(&self, key: &VariantKey) -> Result<PathBuf, MirrorError> {
        let dir = self.month_dir(key);
        fs::create_dir_all(&dir)
            .await
            .map_err(|source| MirrorError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        Ok(dir)
    }

    /// Checks if the canonical file of a variant exists.
    #[must_use]
    pub fn contains(&self, key: &VariantKey, tag: ResolutionTag) -> bool {
        self.variant_path(key, tag).is_file()
    }

    /// Lists `.jpg` file names in `key`'s month directory, sorted by name.
    /// A missing directory lists as empty.
    #[must_use]
    pub fn scan_month(&self, key: &VariantKey) -> Vec<String> {
        let dir = self.month_dir(key);
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %dir.display(), error = %e, "Failed to scan month directory");
                }
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| {
                Path::new(name)
                    .extension()
                    .is_some_and(|ext| ext == VARIANT_EXTENSION)
            })
            .collect();
        names.sort();
        names
    }

    /// Writes one variant, replacing any file of the same name. The bytes go
    /// to a temporary file in the month directory first, so readers never
    /// observe a partial image.
    ///
    /// # Errors
    /// Returns error if the file cannot be written or moved into place.
    pub async fn write_variant(
        &self,
        key: &VariantKey,
        tag: ResolutionTag,
        bytes: Bytes,
    ) -> Result<VariantFile, MirrorError> {
        let dir = self.month_dir(key);
        let path = self.variant_path(key, tag);
        let target = path.clone();

        tokio::task::spawn_blocking(move || persist_atomically(&dir, &target, &bytes))
            .await
            .map_err(|e| MirrorError::WriteFile {
                path: path.clone(),
                source: std::io::Error::other(e),
            })?
            .map_err(|source| MirrorError::WriteFile {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), tag = %tag, "Stored variant");

        Ok(VariantFile {
            identity: key.identity().to_string(),
            resolution: tag,
            year_month: key.year_month().to_string(),
            path,
        })
    }
}

/// Writes `bytes` to `target` through a temporary file created in `dir`.
///
/// # Errors
/// Returns error if the temporary file cannot be written or persisted.
pub fn persist_atomically(dir: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut temp_file = tempfile::NamedTempFile::new_in(dir)?;
    temp_file.write_all(bytes)?;
    temp_file.flush()?;
    temp_file.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_mirror() -> (LocalMirror, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let mirror = LocalMirror::new(temp_dir.path().join("local_img"), "/local_img/");
        (mirror, temp_dir)
    }

    #[test]
    fn test_layout() {
        let mirror = LocalMirror::default_location();
        let key = VariantKey::new("OHR.A", "2024-03");

        assert_eq!(
            mirror.variant_path(&key, ResolutionTag::W1920),
            PathBuf::from("docs/local_img/2024-03/OHR.A_1920.jpg")
        );
        assert_eq!(
            mirror.web_path(&key, "OHR.A_1920.jpg"),
            "/local_img/2024-03/OHR.A_1920.jpg"
        );
    }

    #[tokio::test]
    async fn test_write_and_probe_variant() {
        let (mirror, _temp) = create_test_mirror();
        let key = VariantKey::new("OHR.A", "2024-03");

        mirror.ensure_month_dir(&key).await.unwrap();
        assert!(!mirror.contains(&key, ResolutionTag::W480));

        let file = mirror
            .write_variant(&key, ResolutionTag::W480, Bytes::from_static(b"jpeg"))
            .await
            .unwrap();

        assert!(mirror.contains(&key, ResolutionTag::W480));
        assert_eq!(file.resolution, ResolutionTag::W480);
        assert_eq!(std::fs::read(&file.path).unwrap(), b"jpeg");
    }

    #[tokio::test]
    async fn test_rewrite_overwrites_in_place() {
        let (mirror, _temp) = create_test_mirror();
        let key = VariantKey::new("OHR.A", "2024-03");
        mirror.ensure_month_dir(&key).await.unwrap();

        mirror
            .write_variant(&key, ResolutionTag::Uhd, Bytes::from_static(b"first"))
            .await
            .unwrap();
        mirror
            .write_variant(&key, ResolutionTag::Uhd, Bytes::from_static(b"second"))
            .await
            .unwrap();

        assert_eq!(mirror.scan_month(&key), vec!["OHR.A_UHD.jpg".to_string()]);
        assert_eq!(
            std::fs::read(mirror.variant_path(&key, ResolutionTag::Uhd)).unwrap(),
            b"second"
        );
    }

    #[tokio::test]
    async fn test_write_without_month_dir_fails() {
        let (mirror, _temp) = create_test_mirror();
        let key = VariantKey::new("OHR.A", "2024-03");

        let err = mirror
            .write_variant(&key, ResolutionTag::Uhd, Bytes::from_static(b"x"))
            .await
            .unwrap_err();

        assert!(err.is_filesystem());
    }

    #[test]
    fn test_scan_month_filters_and_sorts() {
        let (mirror, _temp) = create_test_mirror();
        let key = VariantKey::new("Foo", "2024-03");
        let dir = mirror.month_dir(&key);
        std::fs::create_dir_all(dir.join("nested.jpg")).unwrap();
        for name in ["b.jpg", "a.jpg", "notes.txt", "c.jpeg"] {
            std::fs::write(dir.join(name), b"x").unwrap();
        }

        assert_eq!(mirror.scan_month(&key), vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_scan_missing_month_is_empty() {
        let (mirror, _temp) = create_test_mirror();
        assert!(
            mirror
                .scan_month(&VariantKey::new("Foo", "1999-01"))
                .is_empty()
        );
    }
}
