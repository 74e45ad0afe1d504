//! Typed entity storage over a [`StorageBackend`].

use crate::storage_trait::{Result, StorageBackend, StorageError};
use sandboxdb_commons::StorageKey;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Typed CRUD with type-safe keys and JSON serialization.
///
/// Implementors supply the backend and a partition name; `get`/`put`/
/// `delete`/`scan_all` come for free. Keys are typed ([`StorageKey`]) so a
/// store for one entity cannot be addressed with another entity's id.
pub trait EntityStore<K, V>
where
    K: StorageKey,
    V: Serialize + DeserializeOwned + Send + Sync,
{
    fn backend(&self) -> &Arc<dyn StorageBackend>;

    /// Partition name for this entity type, e.g. `"workspaces"`.
    fn partition(&self) -> &str;

    fn serialize(&self, entity: &V) -> Result<Vec<u8>> {
        serde_json::to_vec(entity).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<V> {
        serde_json::from_slice(bytes).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn put(&self, key: &K, entity: &V) -> Result<()> {
        let value = self.serialize(entity)?;
        self.backend().put(self.partition(), &key.storage_key(), &value)
    }

    /// Returns `Ok(None)` when the key does not exist.
    fn get(&self, key: &K) -> Result<Option<V>> {
        match self.backend().get(self.partition(), &key.storage_key())? {
            Some(bytes) => Ok(Some(self.deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    fn delete(&self, key: &K) -> Result<()> {
        self.backend().delete(self.partition(), &key.storage_key())
    }

    /// All entities in the partition. Fine for this store's volume (one
    /// document per workspace).
    fn scan_all(&self) -> Result<Vec<V>> {
        self.backend()
            .scan(self.partition())?
            .into_iter()
            .map(|(_, bytes)| self.deserialize(&bytes))
            .collect()
    }
}
