use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::idiom::IdiomCatalog;

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<IdiomCatalog>,
    config: Arc<Config>,
    started_at: Instant,
}

impl AppState {
    pub fn new(catalog: IdiomCatalog, config: &Config) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config.clone()),
            started_at: Instant::now(),
        }
    }

    pub fn catalog(&self) -> &IdiomCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
