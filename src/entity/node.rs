//! CDN node entity

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::error::{LedgerError, Result};

/// A registered delivery endpoint.
///
/// `tasks` mirrors `Task::nodes`: the ids of tasks this node has claimed,
/// in claim order, never with duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdnNode {
    /// Unique node name (required)
    pub name: String,

    /// Reputation/ranking value; opaque to the engine
    pub score: i64,

    /// Endpoint address or hostname (required)
    pub ip: String,

    /// Ids of tasks claimed by this node (no duplicates)
    pub tasks: Vec<String>,
}

impl Entity for CdnNode {
    const PREFIX: &'static str = "node:";
    const KIND: &'static str = "cdn node";

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(LedgerError::Validation(
                "cannot save a cdn node without name".to_string(),
            ));
        }
        if self.ip.is_empty() {
            return Err(LedgerError::Validation(
                "cannot save a cdn node without ip".to_string(),
            ));
        }
        Ok(())
    }

    fn apply_defaults(&mut self, _now: i64) {}

    fn storage_key(&self) -> String {
        self.name.clone()
    }
}
