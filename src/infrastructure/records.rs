//! Record files produced by the wallpaper list collector.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::domain::entities::ImageRecord;

/// Errors while loading a record file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum RecordFileError {
    #[error("failed to read record file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse record file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads a JSON array of `{ "url", "date", "description" }` records, keeping
/// the file's order.
///
/// # Errors
///
/// Returns `RecordFileError` if the file cannot be read or parsed.
pub fn load_records(path: &Path) -> Result<Vec<ImageRecord>, RecordFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| RecordFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records: Vec<ImageRecord> =
        serde_json::from_str(&content).map_err(|source| RecordFileError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), count = records.len(), "Loaded image records");
    Ok(records)
}
