//! Persistence layer for schedules and teaching activities.
//!
//! The module follows the repository pattern so storage backends can be
//! swapped without touching business logic:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, batch triggers)           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services/) - Business Logic             │
//! │  - Conflict detection and schedule management           │
//! │  - Recurring activity generation                        │
//! └───────────────────┬─────────────────────────────────────┘
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! │  - ScheduleRepository / ActivityRepository              │
//! └───────────────────┬─────────────────────────────────────┘
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
pub use repository::{
    ActivityRepository, ErrorContext, FullRepository, RepositoryError, RepositoryResult,
    ScheduleRepository,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Initialize the global repository singleton for the configured backend.
///
/// Honors `SCHOOLSCHED_CONFIG` (TOML config file path) and falls back to the
/// `REPOSITORY_TYPE` environment variable.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = match std::env::var("SCHOOLSCHED_CONFIG") {
        Ok(path) => RepositoryFactory::create_from_config_file(std::path::Path::new(&path))
            .map_err(|e| anyhow::anyhow!(e.to_string()))
            .context("Failed to create repository from config file")?,
        Err(_) => RepositoryFactory::create(RepositoryType::from_env())
            .map_err(|e| anyhow::anyhow!(e.to_string()))?,
    };

    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository();
    }

    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
