//! Mirror error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ports::FetchError;

/// Errors raised while mirroring or indexing a record.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum MirrorError {
    #[error("invalid image record: {reason}")]
    InvalidRecord { reason: String },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl MirrorError {
    /// Creates invalid record error.
    #[must_use]
    pub fn invalid_record(reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            reason: reason.into(),
        }
    }

    /// Returns whether the error stems from bad input rather than I/O.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidRecord { .. })
    }

    /// Returns whether the error is a local filesystem failure.
    #[must_use]
    pub const fn is_filesystem(&self) -> bool {
        matches!(
            self,
            Self::CreateDir { .. } | Self::WriteFile { .. } | Self::ReadFile { .. }
        )
    }
}
