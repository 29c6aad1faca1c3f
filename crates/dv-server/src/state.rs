use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared state handed to every request handler.
#[derive(Clone, Debug)]
pub struct AppState {
    config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
