//! Store Module
//!
//! Ordered key-value storage behind the `KvStore` trait.
//!
//! ## Responsibilities
//! - Point get/put over string keys
//! - Multi-key puts committed under a single write lock
//! - Prefix-bounded range scans in key order
//!
//! ## Key Layout
//! All entity families share one flat key space partitioned by prefix:
//! ```text
//! task:{id}                      - Task
//! node:{name}                    - CDNNode
//! visited:{time:020}:{suffix}    - VisitRecord (zero-padded time keeps
//!                                  records in rough chronological order)
//! TaskIDs                        - singleton JSON array of known task ids
//! ```

mod memory;
mod file;

pub use memory::MemoryStore;
pub use file::FileStore;

use crate::error::Result;

/// Ordered key-value store interface.
///
/// Implementations must be safe to share across threads; each method is a
/// complete unit of work with no cross-call state beyond the stored data.
pub trait KvStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set a key-value pair.
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Set several key-value pairs under one write lock.
    ///
    /// Either every entry is visible afterwards or (on error) none are.
    /// Used to commit both sides of a task claim together.
    fn put_many(&self, entries: &[(String, Vec<u8>)]) -> Result<()>;

    /// Scan all keys starting with `prefix`, sorted by key.
    ///
    /// Returns a fresh snapshot each call; entries follow the store's
    /// native key ordering, not insertion order.
    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>>;
}
