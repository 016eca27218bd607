//! Repository factory for dependency injection.
//!
//! Centralizes creation of repository instances from runtime configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};

/// Repository backend selection.
///
/// Only the in-memory backend exists today; the enum keeps the configuration
/// seam so a SQL-backed implementation can slot in without touching callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepositoryType {
    /// In-memory local repository
    #[default]
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Read the repository type from the `REPOSITORY_TYPE` environment
    /// variable, defaulting to `Local`.
    pub fn from_env() -> Self {
        std::env::var("REPOSITORY_TYPE")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or_default()
    }
}

/// Factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance for the given backend type.
    pub fn create(repo_type: RepositoryType) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a repository from a TOML configuration file.
    pub fn create_from_config_file(path: &Path) -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::load_from_path(path)?;
        let repo_type = config
            .repository
            .repo_type
            .parse::<RepositoryType>()
            .map_err(RepositoryError::configuration)?;
        Self::create(repo_type)
    }
}
