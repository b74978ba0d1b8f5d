//! TaskIndex Module
//!
//! Singleton list of known task ids at a well-known key.
//!
//! The `task:` prefix scan is the authoritative enumeration; this index is
//! secondary bookkeeping kept for deployments whose store lacks a reliable
//! range scan. It can always be reconstructed with `rebuild`, so the two
//! never need to be trusted to agree.

use tracing::debug;

use crate::entity::Task;
use crate::error::Result;
use crate::registry::Registry;
use crate::store::KvStore;

/// Well-known key holding the JSON array of task ids
pub const TASK_IDS_KEY: &str = "TaskIDs";

/// Ordered, duplicate-free list of known task identifiers.
pub struct TaskIndex<'a, S: KvStore> {
    store: &'a S,
}

impl<'a, S: KvStore> TaskIndex<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Reset the index to an empty list
    pub fn init(&self) -> Result<()> {
        self.write_ids(&[])
    }

    /// Append `id` to the list if absent (read-modify-write)
    pub fn register(&self, id: &str) -> Result<()> {
        let mut ids = self.ids()?;
        if !ids.iter().any(|existing| existing.as_str() == id) {
            ids.push(id.to_string());
            self.write_ids(&ids)?;
            debug!(id, "task id registered");
        }
        Ok(())
    }

    /// Current list of registered ids (empty when uninitialized)
    pub fn ids(&self) -> Result<Vec<String>> {
        match self.store.get(TASK_IDS_KEY)? {
            Some(bytes) if !bytes.is_empty() => {
                serde_json::from_slice(&bytes).map_err(Into::into)
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Reconstruct the list from the authoritative `task:` prefix scan
    pub fn rebuild(&self) -> Result<()> {
        let registry = Registry::new(self.store);
        let ids: Vec<String> = registry
            .list_all::<Task>()?
            .into_iter()
            .map(|task| task.id)
            .collect();
        self.write_ids(&ids)
    }

    fn write_ids(&self, ids: &[String]) -> Result<()> {
        let bytes = serde_json::to_vec(ids)?;
        self.store.put(TASK_IDS_KEY, &bytes)
    }
}
