//! Command definitions
//!
//! Represents named operations from an external dispatcher.

use crate::error::{LedgerError, Result};

/// A parsed operation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Initialize the ledger (empty task-id index, optional sample tasks)
    Init { seed: bool },

    /// Parse, validate, and save a task
    SubmitTask { json: String },

    /// Parse, validate, and save a CDN node
    RegisterCdnNode { json: String },

    /// Link a node and a task bidirectionally
    ClaimTask { node_name: String, task_id: String },

    /// Record a client fetch
    RecordVisit { json: String },

    /// Confirm recorded visits matching a settlement triple
    ConfirmRecordVisit {
        task_id: String,
        node_name: String,
        endpoint_ip: String,
    },

    /// All tasks, as a JSON array
    GetTaskList,

    /// All nodes, as a JSON array
    GetNodeList,

    /// Visit records matching either filter, as a JSON array
    GetReport {
        task_id: Option<String>,
        node_name: Option<String>,
    },

    /// Route an endpoint to a claiming node's IP (raw bytes)
    LocateCdn {
        endpoint_ip: String,
        task_id: String,
    },
}

impl Command {
    /// Parse an operation from its wire name and positional string args.
    ///
    /// The names are the stable contract surface; an unknown name is a
    /// protocol error.
    pub fn parse(name: &str, args: &[String]) -> Result<Command> {
        match name {
            "init" => Ok(Command::Init {
                seed: args.first().map(|a| a == "seed").unwrap_or(false),
            }),
            "submitTask" => Ok(Command::SubmitTask {
                json: take_arg(name, args, 0)?,
            }),
            "registerCDNNode" => Ok(Command::RegisterCdnNode {
                json: take_arg(name, args, 0)?,
            }),
            "claimTask" => Ok(Command::ClaimTask {
                node_name: take_arg(name, args, 0)?,
                task_id: take_arg(name, args, 1)?,
            }),
            "recordVisit" => Ok(Command::RecordVisit {
                json: take_arg(name, args, 0)?,
            }),
            "confirmRecordVisit" => Ok(Command::ConfirmRecordVisit {
                task_id: take_arg(name, args, 0)?,
                node_name: take_arg(name, args, 1)?,
                endpoint_ip: take_arg(name, args, 2)?,
            }),
            "getTaskList" => Ok(Command::GetTaskList),
            "getNodeList" => Ok(Command::GetNodeList),
            // An explicitly passed empty filter is kept as-is (it matches
            // nothing); only absent args mean "no filter".
            "getReport" => Ok(Command::GetReport {
                task_id: args.first().cloned(),
                node_name: args.get(1).cloned(),
            }),
            "locateCDN" => Ok(Command::LocateCdn {
                endpoint_ip: take_arg(name, args, 0)?,
                task_id: take_arg(name, args, 1)?,
            }),
            _ => Err(LedgerError::Protocol(format!(
                "unknown operation: {}",
                name
            ))),
        }
    }

    /// Whether this operation is read-only (safe on the query path)
    pub fn is_query(&self) -> bool {
        matches!(
            self,
            Command::GetTaskList
                | Command::GetNodeList
                | Command::GetReport { .. }
                | Command::LocateCdn { .. }
        )
    }
}

fn take_arg(name: &str, args: &[String], idx: usize) -> Result<String> {
    args.get(idx).cloned().ok_or_else(|| {
        LedgerError::Protocol(format!(
            "{}: missing argument {} (got {})",
            name,
            idx + 1,
            args.len()
        ))
    })
}
