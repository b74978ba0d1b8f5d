//! Ledger Module
//!
//! The facade that coordinates all components.
//!
//! ## Responsibilities
//! - Wire registry, task index, assignment engine, and visit ledger over
//!   one store
//! - Execute named operations from the dispatcher surface
//! - Enforce the read-only query path
//! - Initialize (and optionally seed) a fresh ledger

use tracing::info;

use crate::assignment::{AssignmentEngine, FirstByteSelector, NodeSelector};
use crate::config::Config;
use crate::entity::{CdnNode, Task, VisitRecord};
use crate::error::{LedgerError, Result};
use crate::index::TaskIndex;
use crate::protocol::Command;
use crate::registry::Registry;
use crate::store::{FileStore, KvStore};
use crate::visit::VisitLedger;

/// The task-assignment ledger.
///
/// ## Execution Model
///
/// Each public operation is a synchronous read-then-write sequence executed
/// to completion; isolation across concurrent invocations is the store's
/// concern. The ledger keeps no mutable state of its own beyond what is
/// persisted, so any operation is safe to re-execute from a single ambient
/// transaction context.
pub struct Ledger<S: KvStore> {
    store: S,
    selector: Box<dyn NodeSelector>,
    seed_sample_tasks: bool,
}

impl Ledger<FileStore> {
    /// Open a file-backed ledger with the given config
    pub fn open(config: Config) -> Result<Self> {
        let store = FileStore::open(&config.data_dir, config.snapshot_sync)?;
        let mut ledger = Self::new(store);
        ledger.seed_sample_tasks = config.seed_sample_tasks;
        Ok(ledger)
    }
}

impl<S: KvStore> Ledger<S> {
    /// Create a ledger over an existing store, with the default
    /// first-byte-modulo node selector
    pub fn new(store: S) -> Self {
        Self {
            store,
            selector: Box::new(FirstByteSelector),
            seed_sample_tasks: false,
        }
    }

    /// Replace the node-selection strategy
    pub fn with_selector(mut self, selector: Box<dyn NodeSelector>) -> Self {
        self.selector = selector;
        self
    }

    // =========================================================================
    // Invoke Operations (mutating)
    // =========================================================================

    /// Initialize the task-id index; optionally seed sample tasks.
    ///
    /// The index is rebuilt from the authoritative `task:` prefix scan, so
    /// calling this on a fresh ledger writes an empty list and re-running
    /// it later never leaves the index disagreeing with the stored tasks.
    /// Seeding happens when requested here or configured on the ledger.
    pub fn init(&self, seed: bool) -> Result<()> {
        TaskIndex::new(&self.store).rebuild()?;
        let seed = seed || self.seed_sample_tasks;
        if seed {
            self.seed_samples()?;
        }
        info!(seed, "ledger initialized");
        Ok(())
    }

    /// Parse, validate, and save a task; returns the (possibly generated) id
    pub fn submit_task(&self, json: &str) -> Result<String> {
        let mut task: Task = serde_json::from_str(json)
            .map_err(|e| LedgerError::Serialization(format!("bad task payload: {}", e)))?;
        self.save_task(&mut task)?;
        Ok(task.id)
    }

    /// Parse, validate, and save a CDN node registration
    pub fn register_cdn_node(&self, json: &str) -> Result<()> {
        let mut node: CdnNode = serde_json::from_str(json)
            .map_err(|e| LedgerError::Serialization(format!("bad cdn node payload: {}", e)))?;
        Registry::new(&self.store).save(&mut node)?;
        Ok(())
    }

    /// Link a node and a task bidirectionally
    pub fn claim_task(&self, node_name: &str, task_id: &str) -> Result<()> {
        AssignmentEngine::new(&self.store, self.selector.as_ref()).claim(node_name, task_id)
    }

    /// Parse, validate, and record a visit
    pub fn record_visit(&self, json: &str) -> Result<()> {
        let record: VisitRecord = serde_json::from_str(json)
            .map_err(|e| LedgerError::Serialization(format!("bad visit record payload: {}", e)))?;
        VisitLedger::new(&self.store).record_visit(record)
    }

    /// Confirm all visits matching the settlement triple; returns the count
    pub fn confirm_record_visit(
        &self,
        task_id: &str,
        node_name: &str,
        endpoint_ip: &str,
    ) -> Result<usize> {
        VisitLedger::new(&self.store).confirm_record_visit(task_id, node_name, endpoint_ip)
    }

    // =========================================================================
    // Query Operations (read-only)
    // =========================================================================

    /// All tasks, in store key order
    pub fn get_task_list(&self) -> Result<Vec<Task>> {
        Registry::new(&self.store).list_all::<Task>()
    }

    /// All registered nodes, in store key order
    pub fn get_node_list(&self) -> Result<Vec<CdnNode>> {
        Registry::new(&self.store).list_all::<CdnNode>()
    }

    /// Visit records, filtered by task id OR node name (union semantics)
    pub fn get_report(
        &self,
        task_filter: Option<&str>,
        node_filter: Option<&str>,
    ) -> Result<Vec<VisitRecord>> {
        VisitLedger::new(&self.store).get_report(task_filter, node_filter)
    }

    /// Route a client endpoint to a claiming node's IP
    pub fn locate_cdn(&self, endpoint_ip: &str, task_id: &str) -> Result<String> {
        AssignmentEngine::new(&self.store, self.selector.as_ref()).locate(endpoint_ip, task_id)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Execute any named operation.
    ///
    /// Query payloads are JSON arrays, except `locateCDN` which returns the
    /// raw IP bytes. Mutating operations return no payload, apart from
    /// `submitTask` (the saved id) and `confirmRecordVisit` (the confirmed
    /// count as decimal text).
    pub fn execute(&self, command: Command) -> Result<Option<Vec<u8>>> {
        match command {
            Command::Init { seed } => {
                self.init(seed)?;
                Ok(None)
            }
            Command::SubmitTask { json } => {
                let id = self.submit_task(&json)?;
                Ok(Some(id.into_bytes()))
            }
            Command::RegisterCdnNode { json } => {
                self.register_cdn_node(&json)?;
                Ok(None)
            }
            Command::ClaimTask { node_name, task_id } => {
                self.claim_task(&node_name, &task_id)?;
                Ok(None)
            }
            Command::RecordVisit { json } => {
                self.record_visit(&json)?;
                Ok(None)
            }
            Command::ConfirmRecordVisit {
                task_id,
                node_name,
                endpoint_ip,
            } => {
                let confirmed = self.confirm_record_visit(&task_id, &node_name, &endpoint_ip)?;
                Ok(Some(confirmed.to_string().into_bytes()))
            }
            Command::GetTaskList => {
                let tasks = self.get_task_list()?;
                Ok(Some(serde_json::to_vec(&tasks)?))
            }
            Command::GetNodeList => {
                let nodes = self.get_node_list()?;
                Ok(Some(serde_json::to_vec(&nodes)?))
            }
            Command::GetReport { task_id, node_name } => {
                let records = self.get_report(task_id.as_deref(), node_name.as_deref())?;
                Ok(Some(serde_json::to_vec(&records)?))
            }
            Command::LocateCdn {
                endpoint_ip,
                task_id,
            } => {
                let ip = self.locate_cdn(&endpoint_ip, &task_id)?;
                Ok(Some(ip.into_bytes()))
            }
        }
    }

    /// Execute on the query path, refusing anything that would mutate state
    pub fn query(&self, command: Command) -> Result<Option<Vec<u8>>> {
        if !command.is_query() {
            return Err(LedgerError::Protocol(format!(
                "operation not allowed on the query path: {:?}",
                command
            )));
        }
        self.execute(command)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn save_task(&self, task: &mut Task) -> Result<()> {
        Registry::new(&self.store).save(task)?;
        // Secondary bookkeeping: every saved task id is registered in the
        // singleton index as well.
        TaskIndex::new(&self.store).register(&task.id)
    }

    fn seed_samples(&self) -> Result<()> {
        let samples = [
            ("001", "IBM", "https://www.ibm.com/us-en/images/homepage/featured/02032017_f_arrowhead_15894_600x260.jpg"),
            ("002", "Baidu", "https://ss0.bdstatic.com/5aV1bjqh_Q23odCf/static/superman/img/logo/bd_logo1_31bdc765.png"),
            ("003", "Tudo", "http://www.tudou.com/favicon.ico"),
            ("004", "Youtube", "http://www.youtube.com/favicon.ico"),
        ];
        for (id, customer, url) in samples {
            let mut task = Task {
                id: id.to_string(),
                customer: customer.to_string(),
                url: url.to_string(),
                ..Task::default()
            };
            self.save_task(&mut task)?;
        }
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}
