//! Application state for the web layer.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::Store;

/// Shared application state.
///
/// The store is read-only once loaded, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Gazetteer store
    pub store: Arc<dyn Store>,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: impl Store + 'static, config: ServerConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}
