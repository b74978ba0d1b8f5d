//! Assignment Module
//!
//! Claim linking and CDN-node selection.
//!
//! ## Responsibilities
//! - `claim`: bidirectional task<->node linking, committed as one batch
//! - `locate`: deterministic, read-only routing of a client endpoint to a
//!   claiming node's IP

use tracing::{debug, info};

use crate::entity::{CdnNode, Entity, Task};
use crate::error::{LedgerError, Result};
use crate::registry::Registry;
use crate::store::KvStore;

/// Node-selection strategy for `locate`.
///
/// Implementations pick an index into a non-empty node list for a given
/// client endpoint. Alternative routing policies (locality, load) plug in
/// here without touching claim/locate plumbing.
pub trait NodeSelector: Send + Sync {
    /// Pick an index into `nodes` (guaranteed non-empty) for this endpoint
    fn select_node(&self, nodes: &[String], endpoint_ip: &str) -> usize;
}

/// Default selector: first byte of the endpoint address, modulo node count.
///
/// Stateless and reproducible by design; not a load-balancing optimization.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstByteSelector;

impl NodeSelector for FirstByteSelector {
    fn select_node(&self, nodes: &[String], endpoint_ip: &str) -> usize {
        let first = endpoint_ip.as_bytes().first().copied().unwrap_or(0);
        first as usize % nodes.len()
    }
}

/// Implements claim and locate over the registry.
pub struct AssignmentEngine<'a, S: KvStore> {
    registry: Registry<'a, S>,
    selector: &'a dyn NodeSelector,
}

impl<'a, S: KvStore> AssignmentEngine<'a, S> {
    pub fn new(store: &'a S, selector: &'a dyn NodeSelector) -> Self {
        Self {
            registry: Registry::new(store),
            selector,
        }
    }

    /// Link a node and a task bidirectionally.
    ///
    /// Appends each side's membership only if absent, then commits both
    /// entities in a single `put_many` batch so the link is never observed
    /// half-applied. Repeating a claim is a no-op (idempotent membership).
    pub fn claim(&self, node_name: &str, task_id: &str) -> Result<()> {
        let mut task: Task = self.registry.get_by_key(task_id)?;
        let mut node: CdnNode = self.registry.get_by_key(node_name)?;

        if !task.nodes.iter().any(|n| n.as_str() == node_name) {
            task.nodes.push(node_name.to_string());
        }
        if !node.tasks.iter().any(|t| t.as_str() == task_id) {
            node.tasks.push(task_id.to_string());
        }

        // Both sides in one batch: the store applies them under one write
        // lock, so task and node always agree on the claim state.
        let entries = vec![
            (
                format!("{}{}", Task::PREFIX, task.storage_key()),
                task.to_bytes()?,
            ),
            (
                format!("{}{}", CdnNode::PREFIX, node.storage_key()),
                node.to_bytes()?,
            ),
        ];
        self.registry.store().put_many(&entries)?;

        info!(node = node_name, task = task_id, "task claimed");
        Ok(())
    }

    /// Route a client endpoint to a claiming node's IP.
    ///
    /// Strictly read-only: executes in query contexts that forbid mutation,
    /// so no visit record is emitted here.
    pub fn locate(&self, endpoint_ip: &str, task_id: &str) -> Result<String> {
        if task_id.is_empty() {
            return Err(LedgerError::Validation(
                "task id should not be blank".to_string(),
            ));
        }

        let task: Task = self.registry.get_by_key(task_id)?;
        if task.nodes.is_empty() {
            return Err(LedgerError::UnclaimedTask(task_id.to_string()));
        }

        let idx = self.selector.select_node(&task.nodes, endpoint_ip);
        let node: CdnNode = self.registry.get_by_key(&task.nodes[idx])?;

        debug!(endpoint = endpoint_ip, task = task_id, node = %node.name, "located node");
        Ok(node.ip)
    }
}
