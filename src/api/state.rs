//! Application state for the Adjustment Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ConfigLoader;
use crate::store::InMemoryStore;

/// Shared application state.
///
/// Holds the loaded configuration and the document store. Handlers that only
/// read take the store's read lock; transitions hold the write lock for the
/// whole validate, persist and hook sequence.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<RwLock<InMemoryStore>>,
}

impl AppState {
    /// Creates the state with a store seeded from the configured master data.
    pub fn new(config: ConfigLoader) -> Self {
        let store = InMemoryStore::from_master_data(config.master_data().clone());
        Self::with_store(config, store)
    }

    /// Creates the state around an existing store.
    pub fn with_store(config: ConfigLoader, store: InMemoryStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared store.
    pub fn store(&self) -> &RwLock<InMemoryStore> {
        &self.store
    }
}
