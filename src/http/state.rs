//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::CaptureRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for capture-database reads
    pub repository: Arc<dyn CaptureRepository>,
    /// Immutable configuration loaded at startup
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(repository: Arc<dyn CaptureRepository>, config: Arc<AppConfig>) -> Self {
        Self { repository, config }
    }
}
