//! # Configuration
//!
//! Optional TOML configuration for the clinker binary.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//!
//! [models]
//! path = "models/cement_clinker_models"
//! noise_seed = 42
//! ```
//!
//! Every key is optional. CLI flags override file values, which override the
//! defaults below.

use clinker_core::ClinkerError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default artifact base path.
pub const DEFAULT_MODEL_PATH: &str = "models/cement_clinker_models";

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub models: ModelConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// `[models]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Base path shared by the three artifact files.
    pub path: PathBuf,
    /// Fixed seed for the phase jitter; live randomness when unset.
    pub noise_seed: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MODEL_PATH),
            noise_seed: None,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ClinkerError> {
        toml::from_str(text).map_err(|e| ClinkerError::ConfigError(e.to_string()))
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ClinkerError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            ClinkerError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ClinkerError::ConfigError(format!(
                "Config file {} bytes exceeds maximum {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            ClinkerError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml(&text)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the given file, or fall back to defaults when no file is named.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ClinkerError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
