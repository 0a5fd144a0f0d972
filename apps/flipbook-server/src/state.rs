//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::flipbook::FlipbookStore;
use crate::ingest::IngestionService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    store: FlipbookStore,
    ingestion: IngestionService,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config, store: FlipbookStore, ingestion: IngestionService) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                ingestion,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the flipbook registry
    pub fn store(&self) -> &FlipbookStore {
        &self.inner.store
    }

    /// Get the ingestion pipeline
    pub fn ingestion(&self) -> &IngestionService {
        &self.inner.ingestion
    }
}
