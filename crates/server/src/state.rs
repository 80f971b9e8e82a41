use std::sync::Arc;

use gamedex_core::{Config, GameStore, Populator};

/// Shared application state
pub struct AppState {
    config: Config,
    store: Arc<dyn GameStore>,
    populator: Populator,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn GameStore>) -> Self {
        let populator = Populator::new(Arc::clone(&store), config.feeds.clone());
        Self {
            config,
            store,
            populator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &dyn GameStore {
        self.store.as_ref()
    }

    pub fn populator(&self) -> &Populator {
        &self.populator
    }
}
