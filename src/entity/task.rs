//! Task entity
//!
//! A unit of content to be delivered, claimed by zero or more CDN nodes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Entity;
use crate::error::Result;

/// A delivery task submitted by a customer.
///
/// `nodes` holds the names of CDN nodes that have claimed this task, in
/// claim order, never with duplicates. Tasks are never deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    /// Unique id; generated (uuid v4) at first save when empty
    pub id: String,

    /// Opaque owner label
    pub customer: String,

    /// Names of nodes that claimed this task (no duplicates)
    pub nodes: Vec<String>,

    /// Opaque descriptive size
    pub size: String,

    /// Opaque content type
    #[serde(rename = "type")]
    pub kind: String,

    /// Resource URL
    pub url: String,

    /// Creation time (unix seconds); set once at first save when zero
    pub time: i64,
}

impl Entity for Task {
    const PREFIX: &'static str = "task:";
    const KIND: &'static str = "task";

    fn validate(&self) -> Result<()> {
        // Nothing required up front: a missing id is generated at save time.
        Ok(())
    }

    fn apply_defaults(&mut self, now: i64) {
        if self.id.is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
        if self.time == 0 {
            self.time = now;
        }
    }

    fn storage_key(&self) -> String {
        self.id.clone()
    }
}
