use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(#[from] reqwest::Error),

    #[error("Backend rejected request: [{status}] {message}")]
    BackendRejected { status: u16, message: String },

    #[error("URL {0} not found in cache, list items first to refresh it")]
    CacheMiss(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Unable to parse article HTML: {0}")]
    ParseFailure(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ConfigError> for BridgeError {
    fn from(err: ConfigError) -> Self {
        BridgeError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
