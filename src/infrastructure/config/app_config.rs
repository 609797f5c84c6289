//! Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use crate::application::use_cases::DEFAULT_MAX_IMAGES;
use crate::domain::services::ResolutionPolicy;
use crate::infrastructure::http::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::infrastructure::mirror::{DEFAULT_MIRROR_ROOT, DEFAULT_WEB_PREFIX};

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, loaded from TOML and overridden by CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Local mirror settings.
    #[serde(default)]
    pub mirror: MirrorConfig,

    /// Width bands used when picking a local resolution.
    #[serde(default)]
    pub rewrite: ResolutionPolicy,
}

/// Local mirror settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Directory holding the `YYYY-MM` partitions.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// URL prefix the mirror root is served under.
    #[serde(default = "default_web_prefix")]
    pub web_prefix: String,

    /// Records mirrored per run.
    #[serde(default = "default_max_images")]
    pub max_images: usize,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// `User-Agent` sent with downloads.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            web_prefix: default_web_prefix(),
            max_images: default_max_images(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_MIRROR_ROOT)
}

fn default_web_prefix() -> String {
    DEFAULT_WEB_PREFIX.to_string()
}

const fn default_max_images() -> usize {
    DEFAULT_MAX_IMAGES
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(root) = &args.mirror_root {
            self.mirror.root = root.clone();
        }
        if let Some(web_prefix) = &args.web_prefix {
            self.mirror.web_prefix = web_prefix.clone();
        }
        if let Some(max_images) = args.max_images {
            self.mirror.max_images = max_images;
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.mirror.timeout_secs = timeout_secs;
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            mirror: MirrorConfig::default(),
            rewrite: ResolutionPolicy::default(),
        }
    }
}
