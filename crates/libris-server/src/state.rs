use std::sync::Arc;

use libris_ops::{Accounts, Library};
use libris_store::FsLibrary;

use crate::config::ServerConfig;
use crate::session::SessionRegistry;

/// Shared application state threaded through every handler.
pub struct AppState {
    pub config: ServerConfig,
    pub accounts: Accounts,
    pub library: Library,
    pub sessions: SessionRegistry,
}

impl AppState {
    /// Build the state for a configuration, rooting all stores at the
    /// configured data directory.
    pub fn new(config: ServerConfig) -> Self {
        let store = Arc::new(FsLibrary::new(&config.data_root));
        Self {
            accounts: Accounts::new(store.clone(), store.clone()),
            library: Library::new(store.clone(), store),
            sessions: SessionRegistry::new(),
            config,
        }
    }
}
