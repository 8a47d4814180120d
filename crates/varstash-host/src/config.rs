use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::paths::ProjectPaths;

#[derive(Debug)]
pub enum ConfigLoadError {
    NotFound,
    ParseError(String),
    IoError(String),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::NotFound => write!(f, "Config file not found"),
            ConfigLoadError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigLoadError::IoError(msg) => write!(f, "IO error reading config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigLoadError {}

/// Host-side configuration for the variable store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarstashConfig {
    /// Log every variable operation at debug level
    #[serde(default)]
    pub log_operations: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// File-logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether to log to a file in addition to the console
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// Log directory override (default: <data dir>/logs)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_logging_enabled() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

impl Default for VarstashConfig {
    fn default() -> Self {
        Self {
            log_operations: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl VarstashConfig {
    pub fn config_path() -> PathBuf {
        match ProjectPaths::new("varstash") {
            Some(paths) => paths.config_dir().join("config.toml"),
            None => PathBuf::from("varstash.toml"),
        }
    }

    pub fn load() -> Result<Self, ConfigLoadError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigLoadError> {
        if !path.exists() {
            return Err(ConfigLoadError::NotFound);
        }

        let content =
            fs::read_to_string(path).map_err(|e| ConfigLoadError::IoError(e.to_string()))?;
        let config =
            toml::from_str(&content).map_err(|e| ConfigLoadError::ParseError(e.to_string()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(&self)?;
        fs::write(path, content)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }
}
