//! Resource Directory: read-only lookup of teachers, classrooms, and subjects.
//!
//! The surrounding records application owns these entities; this core only
//! needs to know whether a referenced id exists and what to call it. Keeping
//! the lookup behind a trait avoids any hidden object graph between schedules
//! and the resources they reference.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::api::{ClassroomId, SubjectId, TeacherId};

/// Minimal display data for a resolved resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceInfo {
    pub id: i64,
    pub name: String,
}

/// Error talking to the directory itself (distinct from "id not found",
/// which is the `Ok(None)` case).
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("resource directory unavailable: {0}")]
    Unavailable(String),
}

/// Read-only resource lookups consumed by the scheduling core.
#[async_trait]
pub trait ResourceDirectory: Send + Sync {
    async fn resolve_teacher(&self, id: TeacherId)
        -> Result<Option<ResourceInfo>, DirectoryError>;

    async fn resolve_classroom(
        &self,
        id: ClassroomId,
    ) -> Result<Option<ResourceInfo>, DirectoryError>;

    async fn resolve_subject(&self, id: SubjectId)
        -> Result<Option<ResourceInfo>, DirectoryError>;
}

/// In-memory directory for tests and local development.
#[derive(Default)]
pub struct StaticDirectory {
    data: RwLock<DirectoryData>,
}

#[derive(Default)]
struct DirectoryData {
    teachers: HashMap<TeacherId, String>,
    classrooms: HashMap<ClassroomId, String>,
    subjects: HashMap<SubjectId, String>,
}

/// TOML seed file shape for [`StaticDirectory::from_toml_path`].
#[derive(Debug, Default, Deserialize)]
struct DirectorySeed {
    #[serde(default)]
    teachers: Vec<ResourceInfo>,
    #[serde(default)]
    classrooms: Vec<ResourceInfo>,
    #[serde(default)]
    subjects: Vec<ResourceInfo>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a directory from a TOML seed file:
    ///
    /// ```toml
    /// [[teachers]]
    /// id = 1
    /// name = "A. Wijaya"
    ///
    /// [[classrooms]]
    /// id = 1
    /// name = "Room 101"
    /// ```
    pub fn from_toml_path(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let seed: DirectorySeed = toml::from_str(&contents)?;

        let directory = Self::new();
        for t in seed.teachers {
            directory.add_teacher(TeacherId::new(t.id), t.name);
        }
        for c in seed.classrooms {
            directory.add_classroom(ClassroomId::new(c.id), c.name);
        }
        for s in seed.subjects {
            directory.add_subject(SubjectId::new(s.id), s.name);
        }
        Ok(directory)
    }

    pub fn add_teacher(&self, id: TeacherId, name: impl Into<String>) {
        self.data.write().teachers.insert(id, name.into());
    }

    pub fn add_classroom(&self, id: ClassroomId, name: impl Into<String>) {
        self.data.write().classrooms.insert(id, name.into());
    }

    pub fn add_subject(&self, id: SubjectId, name: impl Into<String>) {
        self.data.write().subjects.insert(id, name.into());
    }
}

#[async_trait]
impl ResourceDirectory for StaticDirectory {
    async fn resolve_teacher(
        &self,
        id: TeacherId,
    ) -> Result<Option<ResourceInfo>, DirectoryError> {
        Ok(self.data.read().teachers.get(&id).map(|name| ResourceInfo {
            id: id.value(),
            name: name.clone(),
        }))
    }

    async fn resolve_classroom(
        &self,
        id: ClassroomId,
    ) -> Result<Option<ResourceInfo>, DirectoryError> {
        Ok(self
            .data
            .read()
            .classrooms
            .get(&id)
            .map(|name| ResourceInfo {
                id: id.value(),
                name: name.clone(),
            }))
    }

    async fn resolve_subject(
        &self,
        id: SubjectId,
    ) -> Result<Option<ResourceInfo>, DirectoryError> {
        Ok(self.data.read().subjects.get(&id).map(|name| ResourceInfo {
            id: id.value(),
            name: name.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn resolves_known_and_unknown_ids() {
        let directory = StaticDirectory::new();
        directory.add_teacher(TeacherId::new(1), "A. Wijaya");

        let found = directory.resolve_teacher(TeacherId::new(1)).await.unwrap();
        assert_eq!(found.unwrap().name, "A. Wijaya");

        let missing = directory.resolve_teacher(TeacherId::new(2)).await.unwrap();
        assert!(missing.is_none());

        assert!(directory
            .resolve_classroom(ClassroomId::new(1))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn loads_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[teachers]]\nid = 1\nname = \"A. Wijaya\"").unwrap();
        writeln!(file, "[[subjects]]\nid = 3\nname = \"Mathematics\"").unwrap();

        let directory = StaticDirectory::from_toml_path(file.path()).unwrap();
        assert!(directory
            .resolve_teacher(TeacherId::new(1))
            .await
            .unwrap()
            .is_some());
        assert!(directory
            .resolve_subject(SubjectId::new(3))
            .await
            .unwrap()
            .is_some());
        assert!(directory
            .resolve_classroom(ClassroomId::new(1))
            .await
            .unwrap()
            .is_none());
    }
}
