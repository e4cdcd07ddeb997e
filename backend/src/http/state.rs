//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::services::{DatasetCache, SessionStore};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Deployment settings, fixed at startup
    pub config: Arc<DashboardConfig>,
    /// Memoized workbook loads
    pub datasets: DatasetCache,
    /// Per-session navigation state
    pub sessions: SessionStore,
}

impl AppState {
    /// Create a new application state with empty cache and session store.
    pub fn new(config: DashboardConfig) -> Self {
        let sessions = SessionStore::with_limits(
            config.server.session_idle_minutes,
            config.server.max_sessions,
        );
        Self {
            config: Arc::new(config),
            datasets: DatasetCache::new(),
            sessions,
        }
    }
}
