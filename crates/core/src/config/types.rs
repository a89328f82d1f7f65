use std::num::NonZeroUsize;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self { version: 1, logging: LoggingConfig::default(), import: ImportConfig::default() }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Settings for the import worker pool.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Number of worker threads; defaults to the available parallelism.
    #[serde(default)]
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// File the settings came from, `None` when running on defaults.
    pub source: Option<PathBuf>,
    pub workers: NonZeroUsize,
    pub logging: LoggingConfig,
}
