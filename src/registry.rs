//! Registry Module
//!
//! Generic CRUD + prefix-listing primitives over the entity families.
//!
//! ## Responsibilities
//! - Validate and default entities before any write
//! - Point lookups by key under the family prefix
//! - Full-family enumeration via prefix scan

use tracing::debug;

use crate::entity::{now_secs, Entity};
use crate::error::{LedgerError, Result};
use crate::store::KvStore;

/// Typed access to one flat key space, partitioned by entity prefix.
pub struct Registry<'a, S: KvStore> {
    store: &'a S,
}

impl<'a, S: KvStore> Registry<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Validate, assign defaults, and persist an entity.
    ///
    /// Returns the key (under the family prefix) the entity was stored at.
    /// A validation failure leaves nothing persisted.
    pub fn save<T: Entity>(&self, entity: &mut T) -> Result<String> {
        entity.validate()?;
        entity.apply_defaults(now_secs());

        let key = entity.storage_key();
        let full_key = format!("{}{}", T::PREFIX, key);
        self.store.put(&full_key, &entity.to_bytes()?)?;

        debug!(kind = T::KIND, key = %full_key, "entity saved");
        Ok(key)
    }

    /// Point lookup by key (without the family prefix).
    ///
    /// An absent or empty stored value is `NotFound`.
    pub fn get_by_key<T: Entity>(&self, key: &str) -> Result<T> {
        let full_key = format!("{}{}", T::PREFIX, key);
        match self.store.get(&full_key)? {
            Some(bytes) if !bytes.is_empty() => T::from_bytes(&bytes),
            _ => Err(LedgerError::NotFound(format!(
                "no {} found using key {}",
                T::KIND,
                key
            ))),
        }
    }

    /// Every entity of a family, in store key order (fresh snapshot per call)
    pub fn list_all<T: Entity>(&self) -> Result<Vec<T>> {
        Ok(self
            .list_pairs::<T>()?
            .into_iter()
            .map(|(_, entity)| entity)
            .collect())
    }

    /// Like `list_all`, but keeps each entity's full storage key.
    ///
    /// Needed where an entity must be re-persisted under its original key
    /// (visit confirmation).
    pub fn list_pairs<T: Entity>(&self) -> Result<Vec<(String, T)>> {
        let mut results = Vec::new();
        for (key, bytes) in self.store.scan_prefix(T::PREFIX)? {
            results.push((key, T::from_bytes(&bytes)?));
        }
        Ok(results)
    }

    /// The underlying store (for raw singleton keys)
    pub fn store(&self) -> &'a S {
        self.store
    }
}
