//! Repository configuration file support.
//!
//! Reads repository configuration from TOML files:
//!
//! ```toml
//! [repository]
//! type = "local"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::repository::{ErrorContext, RepositoryError, RepositoryResult};

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

impl RepositoryConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_path(path: &Path) -> RepositoryResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            RepositoryError::ConfigurationError {
                message: format!("Failed to read config file: {}", e),
                context: ErrorContext::new("load_config")
                    .with_details(path.display().to_string()),
            }
        })?;
        Self::load_from_str(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn load_from_str(contents: &str) -> RepositoryResult<Self> {
        toml::from_str(contents).map_err(|e| RepositoryError::ConfigurationError {
            message: format!("Invalid repository config: {}", e),
            context: ErrorContext::new("load_config"),
        })
    }
}
