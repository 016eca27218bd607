//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::directory::ResourceDirectory;
use crate::services::ScheduleManager;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for store operations
    pub repository: Arc<dyn FullRepository>,
    /// Read-only resource lookups
    pub directory: Arc<dyn ResourceDirectory>,
    /// Schedule write surface (wraps repository + directory)
    pub manager: Arc<ScheduleManager>,
}

impl AppState {
    /// Create application state, wiring the schedule manager over the given
    /// repository and directory.
    pub fn new(
        repository: Arc<dyn FullRepository>,
        directory: Arc<dyn ResourceDirectory>,
    ) -> Self {
        let manager = Arc::new(ScheduleManager::new(
            Arc::clone(&repository),
            Arc::clone(&directory),
        ));
        Self {
            repository,
            directory,
            manager,
        }
    }
}
