//! Configuration for EdgeLedger
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for an EdgeLedger instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all data files.
    /// Internal structure:
    ///   {data_dir}/
    ///     └── ledger.snap      (checksummed state snapshot)
    pub data_dir: PathBuf,

    /// Sync strategy: when to rewrite the snapshot file
    pub snapshot_sync: SnapshotSyncStrategy,

    // -------------------------------------------------------------------------
    // Seeding Configuration
    // -------------------------------------------------------------------------
    /// Insert the built-in sample tasks during `init`
    pub seed_sample_tasks: bool,
}

/// Snapshot sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSyncStrategy {
    /// Rewrite the snapshot after every mutating operation (safest, slowest)
    EveryWrite,

    /// Rewrite only on explicit `persist`/close (fast, loses unsynced writes on crash)
    OnClose,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./edgeledger_data"),
            snapshot_sync: SnapshotSyncStrategy::EveryWrite,
            seed_sample_tasks: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all storage)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the snapshot sync strategy
    pub fn snapshot_sync(mut self, strategy: SnapshotSyncStrategy) -> Self {
        self.config.snapshot_sync = strategy;
        self
    }

    /// Seed the built-in sample tasks at init time
    pub fn seed_sample_tasks(mut self, seed: bool) -> Self {
        self.config.seed_sample_tasks = seed;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
