//! Entity Module
//!
//! The three persisted entity families and their storage discipline.
//!
//! ## Responsibilities
//! - JSON encode/decode of entity values (the stable wire format)
//! - Required-field validation before any write
//! - Default assignment (generated ids, current timestamps)
//! - Storage key derivation under the per-family prefix

mod task;
mod node;
mod visit;

pub use task::Task;
pub use node::CdnNode;
pub use visit::VisitRecord;

pub(crate) use visit::ACK_CONFIRMED;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{LedgerError, Result};

/// A persisted entity family.
///
/// `save` order is: `validate`, `apply_defaults`, then write under
/// `PREFIX + storage_key()`.
pub trait Entity: Serialize + DeserializeOwned {
    /// Key-space prefix for this family (e.g. `"task:"`)
    const PREFIX: &'static str;

    /// Human-readable family name used in error messages
    const KIND: &'static str;

    /// Check required fields; called before any defaults are assigned
    fn validate(&self) -> Result<()>;

    /// Fill in generated ids / timestamps where absent
    fn apply_defaults(&mut self, now: i64);

    /// Key under the family prefix.
    ///
    /// Only meaningful after `apply_defaults`; visit records mint a fresh
    /// time-ordered key on every call (see `VisitRecord`).
    fn storage_key(&self) -> String;

    /// Serialize to the stored JSON value
    fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(Into::into)
    }

    /// Deserialize from a stored JSON value
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| LedgerError::Serialization(format!("bad {} payload: {}", Self::KIND, e)))
    }
}

/// Current unix time in seconds
pub fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
