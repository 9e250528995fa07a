//! Application state.

use std::sync::Arc;

use tracing::info;

use clipmaster_store::{JobStore, StoreConfig};

use crate::config::ApiConfig;

/// Shared application state, injected into handlers via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<JobStore>,
}

impl AppState {
    /// Create application state, selecting the store backing from the
    /// environment once at startup.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let store_config = StoreConfig::from_env();
        let store = JobStore::from_config(&store_config).await?;

        info!(backend = store.backend_name(), "job store ready");

        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }

    /// Build state around an existing store. Used by tests.
    pub fn with_store(config: ApiConfig, store: JobStore) -> Self {
        Self {
            config,
            store: Arc::new(store),
        }
    }
}
