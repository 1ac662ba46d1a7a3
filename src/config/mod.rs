//! Configuration management for pocketbridge.
//!
//! Configuration is read from `~/.config/pocketbridge/config.toml` (or the
//! `--config` path) at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use crate::store::BackendConfig;
use crate::translate::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub cache: CacheConfig,
    pub server: ServerConfig,
}

/// Legacy protocol listener.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind (default: "0.0.0.0")
    pub host: String,

    /// HTTP port (default: 8080)
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// URL → identifier cache behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// List every bookmark once at startup to fill the cache (default: false)
    pub warm_on_start: bool,

    /// Page size used while warming the cache (default: 100)
    pub page_size: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            warm_on_start: false,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from `path`.
    ///
    /// If the file doesn't exist, creates a default one with comments.
    /// Missing fields in the file will use default values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/pocketbridge/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("pocketbridge").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        r##"# pocketbridge configuration

[backend]
# Bookmark store connector. Available: "readeck"
name = "readeck"

# Base URL of the store, e.g. "http://localhost:8000"
endpoint = ""

# API token used as "Authorization: Bearer <token>"
bearer_token = ""

# Request timeout in seconds
timeout_secs = 30

[cache]
# List every bookmark at startup so article text works without a prior listing
warm_on_start = false

# Page size used while warming the cache
page_size = 100

[server]
# Address and port the legacy API listens on
host = "0.0.0.0"
port = 8080
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
