//! Visit record entity
//!
//! Evidence that a client endpoint fetched a task's resource through a
//! specific CDN node, subject to later acknowledgment for settlement.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entity;
use crate::error::{LedgerError, Result};

/// Ack flag value for a confirmed (settled) visit
pub(crate) const ACK_CONFIRMED: i64 = 1;

/// A recorded client fetch.
///
/// The storage key is `visited:{time:020}:{uuid}`: the zero-padded time
/// keeps records in rough chronological order, the generated suffix keeps
/// two records within the same second from overwriting each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisitRecord {
    /// Visit time (unix seconds); defaulted to now when zero
    pub time: i64,

    /// Id of the fetched task (required)
    #[serde(rename = "taskId")]
    pub task_id: String,

    /// Name of the serving node (required)
    #[serde(rename = "cdnNodeName")]
    pub cdn_node_name: String,

    /// Client endpoint address (required)
    #[serde(rename = "endpointIP")]
    pub endpoint_ip: String,

    /// Observed transferred size (informational)
    pub size: i64,

    /// Settlement flag: 0 unconfirmed, 1 confirmed; transitions 0 -> 1 only
    pub ack: i64,
}

impl Entity for VisitRecord {
    const PREFIX: &'static str = "visited:";
    const KIND: &'static str = "visit record";

    fn validate(&self) -> Result<()> {
        if self.task_id.is_empty() {
            return Err(LedgerError::Validation(
                "cannot save a visit record without task id".to_string(),
            ));
        }
        if self.cdn_node_name.is_empty() {
            return Err(LedgerError::Validation(
                "cannot save a visit record without cdn node name".to_string(),
            ));
        }
        if self.endpoint_ip.is_empty() {
            return Err(LedgerError::Validation(
                "cannot save a visit record without endpoint IP".to_string(),
            ));
        }
        Ok(())
    }

    fn apply_defaults(&mut self, now: i64) {
        if self.time == 0 {
            self.time = now;
        }
    }

    /// Mints a fresh key on every call; a record is keyed once, at save
    /// time, and re-persisted under that same key thereafter.
    fn storage_key(&self) -> String {
        format!("{:020}:{}", self.time, Uuid::new_v4())
    }
}

impl VisitRecord {
    /// Whether this record matches a settlement triple exactly
    pub fn matches(&self, task_id: &str, node_name: &str, endpoint_ip: &str) -> bool {
        self.task_id == task_id
            && self.cdn_node_name == node_name
            && self.endpoint_ip == endpoint_ip
    }
}
