use std::sync::Arc;

use crate::cache::AppCache;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{Settings, Transaction};
use crate::store::DataStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DataStore>,
    pub cache: Arc<AppCache>,
}

impl AppState {
    /// Open the data directory named by `config`.
    pub fn new(config: &Config) -> AppResult<Self> {
        let store = DataStore::open(&config.data_dir)?;
        Ok(Self {
            store: Arc::new(store),
            cache: Arc::new(AppCache::new()),
        })
    }

    pub fn cached_transactions(&self) -> AppResult<Arc<Vec<Transaction>>> {
        self.cache.load_transactions(&self.store)
    }

    pub fn cached_categories(&self) -> AppResult<Vec<String>> {
        self.cache.load_categories(&self.store)
    }

    pub fn load_settings(&self) -> AppResult<Settings> {
        self.cache.load_settings(&self.store)
    }
}
