//! Protocol Module
//!
//! The stable named-operation surface exposed to an external dispatcher.
//!
//! ## Operations
//!
//! Mutating (invoke path):
//! - `init`               - args: [seed flag]
//! - `submitTask`         - args: [task JSON]
//! - `registerCDNNode`    - args: [node JSON]
//! - `claimTask`          - args: [node name, task id]
//! - `recordVisit`        - args: [visit record JSON]
//! - `confirmRecordVisit` - args: [task id, node name, endpoint IP]
//!
//! Read-only (query path, must not mutate state):
//! - `getTaskList`        - JSON array of tasks
//! - `getNodeList`        - JSON array of nodes
//! - `getReport`          - args: [task id?, node name?], JSON array of records
//! - `locateCDN`          - args: [endpoint IP, task id], raw IP bytes
//!
//! ### Status Codes
//! - Ok
//! - NotFound
//! - Error

mod command;
mod response;

pub use command::Command;
pub use response::{Response, Status};
