//! Visit Ledger Module
//!
//! Records client fetches and settles them on confirmation.

use tracing::{debug, info};

use crate::entity::{VisitRecord, ACK_CONFIRMED};
use crate::error::Result;
use crate::registry::Registry;
use crate::store::KvStore;

/// Record/confirm settlement workflow over visit records.
pub struct VisitLedger<'a, S: KvStore> {
    registry: Registry<'a, S>,
}

impl<'a, S: KvStore> VisitLedger<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            registry: Registry::new(store),
        }
    }

    /// Validate and persist a visit record.
    ///
    /// A zero `time` defaults to now; `ack` starts at 0 unless the caller
    /// already confirmed it out of band.
    pub fn record_visit(&self, mut record: VisitRecord) -> Result<()> {
        let key = self.registry.save(&mut record)?;
        debug!(task = %record.task_id, node = %record.cdn_node_name, key = %key, "visit recorded");
        Ok(())
    }

    /// Confirm every recorded visit matching the settlement triple.
    ///
    /// Scans the whole `visited:` prefix; each exact `(task, node,
    /// endpoint)` match gets `ack = 1` and is re-persisted under its
    /// original key. Zero matches is a successful no-op, not an error.
    /// Returns the number of records confirmed.
    pub fn confirm_record_visit(
        &self,
        task_id: &str,
        node_name: &str,
        endpoint_ip: &str,
    ) -> Result<usize> {
        let mut confirmed = 0;
        for (key, mut record) in self.registry.list_pairs::<VisitRecord>()? {
            if record.matches(task_id, node_name, endpoint_ip) && record.ack != ACK_CONFIRMED {
                record.ack = ACK_CONFIRMED;
                self.registry
                    .store()
                    .put(&key, &serde_json::to_vec(&record)?)?;
                confirmed += 1;
            }
        }

        info!(task = task_id, node = node_name, confirmed, "visit confirmation");
        Ok(confirmed)
    }

    /// Visit records, optionally filtered.
    ///
    /// No filters returns everything. With filters, a record is included
    /// when its task id matches `task_filter` OR its node name matches
    /// `node_filter` (union, not intersection; kept for compatibility
    /// with existing callers).
    pub fn get_report(
        &self,
        task_filter: Option<&str>,
        node_filter: Option<&str>,
    ) -> Result<Vec<VisitRecord>> {
        let all = self.registry.list_all::<VisitRecord>()?;
        if task_filter.is_none() && node_filter.is_none() {
            return Ok(all);
        }

        Ok(all
            .into_iter()
            .filter(|record| {
                task_filter.is_some_and(|t| record.task_id == t)
                    || node_filter.is_some_and(|n| record.cdn_node_name == n)
            })
            .collect())
    }
}
