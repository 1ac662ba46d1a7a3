use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for the bookmark store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Which connector to use (default: "readeck")
    pub name: String,

    /// Base URL of the store, e.g. `http://localhost:8000`
    pub endpoint: String,

    /// Bearer token sent with every store request
    pub bearer_token: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// User agent string to use
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            name: "readeck".to_string(),
            endpoint: String::new(),
            bearer_token: String::new(),
            timeout_secs: 30,
            user_agent: concat!("pocketbridge/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
