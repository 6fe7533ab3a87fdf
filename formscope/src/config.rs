//! Host configuration, read from `formscope.toml`.

use formscope_store::{RetentionPolicy, DEFAULT_SWEEP_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration of a [`FormHost`](crate::FormHost).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormScopeConfig {
    /// How long the registry keeps containers of forms nobody references.
    #[serde(default)]
    pub retention: RetentionPolicy,
    /// Size at which the container map and selector cache sweep dead entries.
    #[serde(default = "default_sweep_threshold")]
    pub sweep_threshold: usize,
}

fn default_sweep_threshold() -> usize {
    DEFAULT_SWEEP_THRESHOLD
}

impl Default for FormScopeConfig {
    fn default() -> Self {
        Self {
            retention: RetentionPolicy::default(),
            sweep_threshold: default_sweep_threshold(),
        }
    }
}

impl FormScopeConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses a TOML file.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file is missing or invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::read_from(path) {
            Ok(config) => {
                info!("Loaded formscope config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Failed to load config from {:?}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }
}
