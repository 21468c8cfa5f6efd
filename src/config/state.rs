// Application state module
// Shared state handed to every connection

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::types::Config;

/// Application state
///
/// The config is fixed for the process lifetime; only the connection
/// counter changes after startup.
pub struct AppState {
    pub config: Config,

    /// Connections currently being served
    pub active_connections: Arc<AtomicUsize>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            active_connections: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }

    pub fn active_connections(&self) -> usize {
        self.active_connections.load(Ordering::SeqCst)
    }
}
