//! Tests for the store layer
//!
//! These tests verify:
//! - Basic get/put over the MemoryStore
//! - Prefix scans (key order, prefix boundaries)
//! - Batched puts
//! - FileStore snapshot persistence and corruption detection

use std::fs;

use edgeledger::config::SnapshotSyncStrategy;
use edgeledger::store::{FileStore, KvStore, MemoryStore};
use tempfile::TempDir;

// =============================================================================
// MemoryStore Tests
// =============================================================================

#[test]
fn test_memory_store_put_get() {
    let store = MemoryStore::new();

    store.put("task:t1", b"hello").unwrap();

    assert_eq!(store.get("task:t1").unwrap(), Some(b"hello".to_vec()));
    assert_eq!(store.get("task:t2").unwrap(), None);
}

#[test]
fn test_memory_store_put_overwrite() {
    let store = MemoryStore::new();

    store.put("key", b"value1").unwrap();
    store.put("key", b"value2").unwrap();

    assert_eq!(store.get("key").unwrap(), Some(b"value2".to_vec()));
}

#[test]
fn test_memory_store_scan_prefix_orders_by_key() {
    let store = MemoryStore::new();

    store.put("task:b", b"2").unwrap();
    store.put("task:a", b"1").unwrap();
    store.put("task:c", b"3").unwrap();

    let keys: Vec<String> = store
        .scan_prefix("task:")
        .unwrap()
        .into_iter()
        .map(|(k, _)| k)
        .collect();

    assert_eq!(keys, vec!["task:a", "task:b", "task:c"]);
}

#[test]
fn test_memory_store_scan_prefix_excludes_other_families() {
    let store = MemoryStore::new();

    store.put("task:t1", b"t").unwrap();
    store.put("node:n1", b"n").unwrap();
    store.put("visited:000:x", b"v").unwrap();
    store.put("TaskIDs", b"[]").unwrap();

    let tasks = store.scan_prefix("task:").unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].0, "task:t1");

    let nodes = store.scan_prefix("node:").unwrap();
    assert_eq!(nodes.len(), 1);
}

#[test]
fn test_memory_store_scan_prefix_empty_store() {
    let store = MemoryStore::new();

    assert!(store.scan_prefix("task:").unwrap().is_empty());
}

#[test]
fn test_memory_store_put_many_all_visible() {
    let store = MemoryStore::new();

    store
        .put_many(&[
            ("task:t1".to_string(), b"a".to_vec()),
            ("node:n1".to_string(), b"b".to_vec()),
        ])
        .unwrap();

    assert_eq!(store.get("task:t1").unwrap(), Some(b"a".to_vec()));
    assert_eq!(store.get("node:n1").unwrap(), Some(b"b".to_vec()));
}

// =============================================================================
// FileStore Tests
// =============================================================================

#[test]
fn test_file_store_open_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("mydb");

    let _store = FileStore::open(&data_dir, SnapshotSyncStrategy::EveryWrite).unwrap();

    assert!(data_dir.exists());
}

#[test]
fn test_file_store_round_trip_across_reopen() {
    let temp_dir = TempDir::new().unwrap();

    {
        let store = FileStore::open(temp_dir.path(), SnapshotSyncStrategy::EveryWrite).unwrap();
        store.put("task:t1", b"payload").unwrap();
        store.put("node:n1", b"other").unwrap();
    }

    let store = FileStore::open(temp_dir.path(), SnapshotSyncStrategy::EveryWrite).unwrap();
    assert_eq!(store.get("task:t1").unwrap(), Some(b"payload".to_vec()));
    assert_eq!(store.get("node:n1").unwrap(), Some(b"other".to_vec()));
}

#[test]
fn test_file_store_on_close_strategy_requires_persist() {
    let temp_dir = TempDir::new().unwrap();

    {
        let store = FileStore::open(temp_dir.path(), SnapshotSyncStrategy::OnClose).unwrap();
        store.put("key", b"lost-without-persist").unwrap();
        // Dropped without persist - snapshot never written
    }

    let store = FileStore::open(temp_dir.path(), SnapshotSyncStrategy::OnClose).unwrap();
    assert_eq!(store.get("key").unwrap(), None);

    store.put("key", b"kept").unwrap();
    store.persist().unwrap();
    drop(store);

    let store = FileStore::open(temp_dir.path(), SnapshotSyncStrategy::OnClose).unwrap();
    assert_eq!(store.get("key").unwrap(), Some(b"kept".to_vec()));
}

#[test]
fn test_file_store_corrupted_snapshot_is_storage_error() {
    let temp_dir = TempDir::new().unwrap();

    let snapshot_path = {
        let store = FileStore::open(temp_dir.path(), SnapshotSyncStrategy::EveryWrite).unwrap();
        store.put("key", b"value").unwrap();
        store.snapshot_path().to_path_buf()
    };

    // Flip a byte in the middle of the body
    let mut bytes = fs::read(&snapshot_path).unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0xFF;
    fs::write(&snapshot_path, &bytes).unwrap();

    let result = FileStore::open(temp_dir.path(), SnapshotSyncStrategy::EveryWrite);
    assert!(matches!(
        result,
        Err(edgeledger::LedgerError::Storage(_))
    ));
}

#[test]
fn test_file_store_truncated_snapshot_is_storage_error() {
    let temp_dir = TempDir::new().unwrap();

    let snapshot_path = {
        let store = FileStore::open(temp_dir.path(), SnapshotSyncStrategy::EveryWrite).unwrap();
        store.put("key", b"value").unwrap();
        store.snapshot_path().to_path_buf()
    };

    fs::write(&snapshot_path, b"ELS").unwrap();

    let result = FileStore::open(temp_dir.path(), SnapshotSyncStrategy::EveryWrite);
    assert!(matches!(
        result,
        Err(edgeledger::LedgerError::Storage(_))
    ));
}
