//! FileStore implementation
//!
//! A `MemoryStore` that persists itself to a checksummed snapshot file.
//!
//! ## Snapshot File Format
//! ```text
//! ┌───────────┬──────────────────────────┬─────────┐
//! │ Magic (4) │ Entries (bincode)        │ CRC (4) │
//! └───────────┴──────────────────────────┴─────────┘
//! ```
//!
//! The CRC32 covers the bincode body. A mismatch on load surfaces
//! `LedgerError::Storage` instead of silently loading garbage.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{KvStore, MemoryStore};
use crate::config::SnapshotSyncStrategy;
use crate::error::{LedgerError, Result};

/// Snapshot file magic: "ELS1" (EdgeLedger Snapshot v1)
const MAGIC: &[u8; 4] = b"ELS1";

/// File-backed ordered key-value store.
///
/// All reads and writes go through an inner `MemoryStore`; the snapshot is
/// rewritten after each mutation (`EveryWrite`) or only on explicit
/// `persist` (`OnClose`).
pub struct FileStore {
    inner: MemoryStore,
    path: PathBuf,
    sync: SnapshotSyncStrategy,
}

impl FileStore {
    const SNAPSHOT_FILENAME: &'static str = "ledger.snap";

    /// Open or create a store rooted at `data_dir`.
    ///
    /// On startup:
    /// 1. Create the data directory if needed
    /// 2. Load and verify the snapshot if one exists
    /// 3. Ready to serve requests
    pub fn open(data_dir: &Path, sync: SnapshotSyncStrategy) -> Result<Self> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(Self::SNAPSHOT_FILENAME);

        let inner = if path.exists() {
            let entries = Self::load_snapshot(&path)?;
            info!(entries = entries.len(), path = %path.display(), "loaded snapshot");
            MemoryStore::from_entries(entries)
        } else {
            MemoryStore::new()
        };

        Ok(Self { inner, path, sync })
    }

    /// Rewrite the snapshot file from current contents.
    ///
    /// Writes to a temp file and renames over the target, so a crash
    /// mid-write never leaves a truncated snapshot behind.
    pub fn persist(&self) -> Result<()> {
        let entries = self.inner.entries();
        let body = bincode::serialize(&entries)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;

        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&body);
        let crc = hasher.finalize();

        let mut buf = Vec::with_capacity(4 + body.len() + 4);
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&body);
        buf.extend_from_slice(&crc.to_be_bytes());

        let tmp = self.path.with_extension("snap.tmp");
        fs::write(&tmp, &buf)?;
        fs::rename(&tmp, &self.path)?;

        debug!(entries = entries.len(), "snapshot persisted");
        Ok(())
    }

    fn load_snapshot(path: &Path) -> Result<Vec<(String, Vec<u8>)>> {
        let buf = fs::read(path)?;
        if buf.len() < 8 || &buf[..4] != MAGIC {
            return Err(LedgerError::Storage(format!(
                "Invalid snapshot header in {}",
                path.display()
            )));
        }

        let body = &buf[4..buf.len() - 4];
        let stored_crc = u32::from_be_bytes([
            buf[buf.len() - 4],
            buf[buf.len() - 3],
            buf[buf.len() - 2],
            buf[buf.len() - 1],
        ]);

        let mut hasher = crc32fast::Hasher::new();
        hasher.update(body);
        if hasher.finalize() != stored_crc {
            return Err(LedgerError::Storage(format!(
                "Snapshot checksum mismatch in {}",
                path.display()
            )));
        }

        bincode::deserialize(body).map_err(|e| LedgerError::Storage(e.to_string()))
    }

    fn sync_if_needed(&self) -> Result<()> {
        if self.sync == SnapshotSyncStrategy::EveryWrite {
            self.persist()?;
        }
        Ok(())
    }

    /// Path of the snapshot file
    pub fn snapshot_path(&self) -> &Path {
        &self.path
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.inner.put(key, value)?;
        self.sync_if_needed()
    }

    fn put_many(&self, entries: &[(String, Vec<u8>)]) -> Result<()> {
        self.inner.put_many(entries)?;
        self.sync_if_needed()
    }

    fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>> {
        self.inner.scan_prefix(prefix)
    }
}
