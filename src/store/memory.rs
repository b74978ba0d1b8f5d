//! MemoryStore implementation
//!
//! BTreeMap-based store with RwLock for concurrency.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::KvStore;
use crate::error::Result;

/// In-memory ordered key-value store.
///
/// Reads take the read lock (many concurrent readers); writes take the
/// write lock. `put_many` holds the write lock for the whole batch, so a
/// batch is never observed half-applied.
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create a new empty MemoryStore
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Build a store from previously exported entries
    pub fn from_entries(entries: Vec<(String, Vec<u8>)>) -> Self {
        Self {
            data: RwLock::new(entries.into_iter().collect()),
        }
    }

    /// Export every entry in key order (for snapshotting)
    pub fn entries(&self) -> Vec<(String, Vec<u8>)> {
        self.data
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.data.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn put_many(&self, entries: &[(String, Vec<u8>)]) -> Result<()> {
        let mut data = self.data.write();
        for (key, value) in entries {
            data.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let data = self.data.read();
        let mut results = Vec::new();
        for (key, value) in data.range(prefix.to_string()..) {
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key.clone(), value.clone()));
        }
        Ok(results)
    }
}
