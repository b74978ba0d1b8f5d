//! Tests for claim linking and node selection
//!
//! These tests verify:
//! - Bidirectional task<->node linking with idempotent membership
//! - NotFound signaling for either missing side
//! - Deterministic first-byte-modulo routing
//! - Pluggable selection strategies

use edgeledger::assignment::{AssignmentEngine, FirstByteSelector, NodeSelector};
use edgeledger::entity::{CdnNode, Task};
use edgeledger::registry::Registry;
use edgeledger::store::MemoryStore;
use edgeledger::LedgerError;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_store_with(tasks: &[&str], nodes: &[(&str, &str)]) -> MemoryStore {
    let store = MemoryStore::new();
    let registry = Registry::new(&store);

    for id in tasks {
        let mut task = Task {
            id: id.to_string(),
            url: format!("http://content/{}", id),
            ..Task::default()
        };
        registry.save(&mut task).unwrap();
    }
    for (name, ip) in nodes {
        let mut node = CdnNode {
            name: name.to_string(),
            ip: ip.to_string(),
            ..CdnNode::default()
        };
        registry.save(&mut node).unwrap();
    }

    store
}

const SELECTOR: FirstByteSelector = FirstByteSelector;

// =============================================================================
// Claim Tests
// =============================================================================

#[test]
fn test_claim_links_both_sides() {
    let store = setup_store_with(&["t1"], &[("n1", "1.1.1.1")]);
    let engine = AssignmentEngine::new(&store, &SELECTOR);

    engine.claim("n1", "t1").unwrap();

    let registry = Registry::new(&store);
    let task: Task = registry.get_by_key("t1").unwrap();
    let node: CdnNode = registry.get_by_key("n1").unwrap();
    assert_eq!(task.nodes, vec!["n1"]);
    assert_eq!(node.tasks, vec!["t1"]);
}

#[test]
fn test_claim_is_idempotent() {
    let store = setup_store_with(&["t1"], &[("n1", "1.1.1.1")]);
    let engine = AssignmentEngine::new(&store, &SELECTOR);

    for _ in 0..3 {
        engine.claim("n1", "t1").unwrap();
    }

    let registry = Registry::new(&store);
    let task: Task = registry.get_by_key("t1").unwrap();
    let node: CdnNode = registry.get_by_key("n1").unwrap();
    assert_eq!(task.nodes, vec!["n1"]);
    assert_eq!(node.tasks, vec!["t1"]);
}

#[test]
fn test_claim_preserves_claim_order() {
    let store = setup_store_with(&["t1"], &[("n1", "1.1.1.1"), ("n2", "2.2.2.2")]);
    let engine = AssignmentEngine::new(&store, &SELECTOR);

    engine.claim("n1", "t1").unwrap();
    engine.claim("n2", "t1").unwrap();

    let task: Task = Registry::new(&store).get_by_key("t1").unwrap();
    assert_eq!(task.nodes, vec!["n1", "n2"]);
}

#[test]
fn test_claim_missing_task_is_not_found() {
    let store = setup_store_with(&[], &[("n1", "1.1.1.1")]);
    let engine = AssignmentEngine::new(&store, &SELECTOR);

    let result = engine.claim("n1", "missing");
    assert!(matches!(result, Err(LedgerError::NotFound(_))));

    // Node side untouched
    let node: CdnNode = Registry::new(&store).get_by_key("n1").unwrap();
    assert!(node.tasks.is_empty());
}

#[test]
fn test_claim_missing_node_is_not_found_and_task_untouched() {
    let store = setup_store_with(&["t1"], &[]);
    let engine = AssignmentEngine::new(&store, &SELECTOR);

    let result = engine.claim("missing", "t1");
    assert!(matches!(result, Err(LedgerError::NotFound(_))));

    // The failed claim must not leave a half-applied link
    let task: Task = Registry::new(&store).get_by_key("t1").unwrap();
    assert!(task.nodes.is_empty());
}

// =============================================================================
// Locate Tests
// =============================================================================

#[test]
fn test_locate_blank_task_id_is_validation_error() {
    let store = setup_store_with(&[], &[]);
    let engine = AssignmentEngine::new(&store, &SELECTOR);

    assert!(matches!(
        engine.locate("1.2.3.4", ""),
        Err(LedgerError::Validation(_))
    ));
}

#[test]
fn test_locate_missing_task_is_not_found() {
    let store = setup_store_with(&[], &[]);
    let engine = AssignmentEngine::new(&store, &SELECTOR);

    assert!(matches!(
        engine.locate("1.2.3.4", "missing"),
        Err(LedgerError::NotFound(_))
    ));
}

#[test]
fn test_locate_unclaimed_task_is_unclaimed_error() {
    let store = setup_store_with(&["t1"], &[]);
    let engine = AssignmentEngine::new(&store, &SELECTOR);

    assert!(matches!(
        engine.locate("1.2.3.4", "t1"),
        Err(LedgerError::UnclaimedTask(_))
    ));
}

#[test]
fn test_locate_first_byte_modulo_scenario() {
    // 'A' = 65, two claiming nodes: 65 % 2 = 1 -> n2 -> "2.2.2.2"
    let store = setup_store_with(&["t1"], &[("n1", "1.1.1.1"), ("n2", "2.2.2.2")]);
    let engine = AssignmentEngine::new(&store, &SELECTOR);
    engine.claim("n1", "t1").unwrap();
    engine.claim("n2", "t1").unwrap();

    let ip = engine.locate("A.client.example", "t1").unwrap();
    assert_eq!(ip, "2.2.2.2");

    // '0' = 48, 48 % 2 = 0 -> n1
    let ip = engine.locate("0.0.0.1", "t1").unwrap();
    assert_eq!(ip, "1.1.1.1");
}

#[test]
fn test_locate_is_deterministic() {
    let store = setup_store_with(&["t1"], &[("n1", "1.1.1.1"), ("n2", "2.2.2.2")]);
    let engine = AssignmentEngine::new(&store, &SELECTOR);
    engine.claim("n1", "t1").unwrap();
    engine.claim("n2", "t1").unwrap();

    let first = engine.locate("9.8.7.6", "t1").unwrap();
    for _ in 0..5 {
        assert_eq!(engine.locate("9.8.7.6", "t1").unwrap(), first);
    }
}

#[test]
fn test_locate_does_not_mutate_state() {
    let store = setup_store_with(&["t1"], &[("n1", "1.1.1.1")]);
    let engine = AssignmentEngine::new(&store, &SELECTOR);
    engine.claim("n1", "t1").unwrap();

    let before = store.entries();
    engine.locate("1.2.3.4", "t1").unwrap();
    assert_eq!(store.entries(), before);
}

#[test]
fn test_locate_with_custom_selector() {
    struct LastNode;
    impl NodeSelector for LastNode {
        fn select_node(&self, nodes: &[String], _endpoint_ip: &str) -> usize {
            nodes.len() - 1
        }
    }

    let store = setup_store_with(&["t1"], &[("n1", "1.1.1.1"), ("n2", "2.2.2.2")]);
    {
        let engine = AssignmentEngine::new(&store, &SELECTOR);
        engine.claim("n1", "t1").unwrap();
        engine.claim("n2", "t1").unwrap();
    }

    let selector = LastNode;
    let engine = AssignmentEngine::new(&store, &selector);
    assert_eq!(engine.locate("0.0.0.1", "t1").unwrap(), "2.2.2.2");
}
