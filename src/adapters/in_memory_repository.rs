//! In-memory agent repository for testing.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Result, error::Error, ports::AgentRepository, q_learning::SavedQAgent};

/// Repository keeping MessagePack blobs in a shared map.
///
/// Clones share the same storage, so a test can hand one clone to a pipeline
/// and inspect the other.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A poisoned map still holds complete blobs.
        self.storage.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of agents currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&key(path))
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.storage().keys().cloned().collect();
        keys.sort();
        keys
    }
}

fn key(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

impl AgentRepository for InMemoryRepository {
    fn save(&self, agent: &SavedQAgent, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec_named(agent).map_err(|e| Error::SerializationContext {
            operation: "serialize agent for in-memory storage".to_string(),
            message: e.to_string(),
        })?;
        self.storage().insert(key(path), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedQAgent> {
        let storage = self.storage();
        let bytes = storage.get(&key(path)).ok_or_else(|| Error::Io {
            operation: format!("load agent from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize agent from in-memory storage".to_string(),
            message: e.to_string(),
        })
    }
}
