use std::sync::Arc;

use crate::app::error::{BridgeError, Result};
use crate::config::Config;
use crate::store::{BackendConfig, BookmarkStore, ReadeckStore};
use crate::translate::Translator;

/// Names accepted in `backend.name`.
pub const BACKENDS: &[&str] = &["readeck"];

pub struct AppContext {
    pub config: Config,
    pub translator: Translator,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let store = Self::connect(&config.backend)?;
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: Arc<dyn BookmarkStore + Send + Sync>) -> Self {
        Self {
            config,
            translator: Translator::new(store),
        }
    }

    fn connect(backend: &BackendConfig) -> Result<Arc<dyn BookmarkStore + Send + Sync>> {
        match backend.name.as_str() {
            "readeck" => Ok(Arc::new(ReadeckStore::new(backend)?)),
            other => Err(BridgeError::Config(format!(
                "unknown backend \"{}\", available backends: {}",
                other,
                BACKENDS.join(", ")
            ))),
        }
    }

    /// Fill the URL cache from the store when `cache.warm_on_start` is set.
    pub async fn warm_cache_if_configured(&self) -> Result<()> {
        if self.config.cache.warm_on_start {
            self.translator
                .refresh_cache(self.config.cache.page_size)
                .await?;
        }
        Ok(())
    }
}
