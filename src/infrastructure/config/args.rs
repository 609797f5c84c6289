use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "wallmirror",
    version,
    about = "Mirror dated wallpapers locally and point generated pages at the mirror",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", env = "WALLMIRROR_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", env = "WALLMIRROR_LOG_PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, env = "WALLMIRROR_LOG_LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Local mirror root directory.
    #[arg(long, value_name = "DIR", env = "WALLMIRROR_ROOT", global = true)]
    pub mirror_root: Option<PathBuf>,

    /// URL prefix the mirror root is served under.
    #[arg(long, env = "WALLMIRROR_WEB_PREFIX", global = true)]
    pub web_prefix: Option<String>,

    /// Maximum number of records mirrored per run.
    #[arg(long, env = "WALLMIRROR_MAX_IMAGES", global = true)]
    pub max_images: Option<usize>,

    /// HTTP request timeout in seconds.
    #[arg(long, env = "WALLMIRROR_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download resolution variants of the most recent records.
    Mirror {
        /// JSON file with the image records.
        #[arg(long, value_name = "FILE")]
        records: PathBuf,
    },
    /// Point every HTML page at locally mirrored variants.
    Rewrite {
        /// JSON file with the image records.
        #[arg(long, value_name = "FILE")]
        records: PathBuf,

        /// Root directory of the generated pages.
        #[arg(long, value_name = "DIR", default_value = "docs")]
        pages: PathBuf,
    },
    /// Mirror, then rewrite.
    Sync {
        /// JSON file with the image records.
        #[arg(long, value_name = "FILE")]
        records: PathBuf,

        /// Root directory of the generated pages.
        #[arg(long, value_name = "DIR", default_value = "docs")]
        pages: PathBuf,
    },
}

impl Command {
    /// Returns the record file every subcommand reads.
    #[must_use]
    pub fn records(&self) -> &PathBuf {
        match self {
            Self::Mirror { records }
            | Self::Rewrite { records, .. }
            | Self::Sync { records, .. } => records,
        }
    }
}
