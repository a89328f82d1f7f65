use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::{env, fs, thread};

use dirs::home_dir;
use shellexpand::full;
use thiserror::Error;

use crate::config::types::{ConfigFile, ResolvedConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,

    #[error("import.workers must be at least 1")]
    InvalidWorkers,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from `config_path`, or from the default location.
    ///
    /// An explicit path must exist. A missing file at the default location
    /// means running on built-in defaults.
    pub fn load(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => {
                let path = default_config_path();
                if !path.exists() {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    return Self::resolve(None, ConfigFile::default());
                }
                path
            }
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }

        Self::resolve(Some(path), cf)
    }

    fn resolve(source: Option<PathBuf>, cf: ConfigFile) -> Result<ResolvedConfig, ConfigError> {
        let workers = match cf.import.workers {
            Some(n) => NonZeroUsize::new(n).ok_or(ConfigError::InvalidWorkers)?,
            None => thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
        };

        // Resolve log file path if present
        let mut logging = cf.logging;
        if let Some(file) = logging.file.take() {
            logging.file = Some(expand_path(&file.to_string_lossy())?);
        }

        Ok(ResolvedConfig { source, workers, logging })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("pagedex").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("pagedex").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
