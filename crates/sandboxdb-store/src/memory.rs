//! In-memory storage backend for tests.

use crate::storage_trait::{compose_key, partition_prefix, Result, StorageBackend};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// BTreeMap-backed [`StorageBackend`] with the same partition semantics as
/// the RocksDB implementation. Test-only convenience; nothing persists.
#[derive(Default)]
pub struct InMemoryBackend {
    map: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for InMemoryBackend {
    fn get(&self, partition: &str, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.map.read().get(&compose_key(partition, key)).cloned())
    }

    fn put(&self, partition: &str, key: &[u8], value: &[u8]) -> Result<()> {
        self.map
            .write()
            .insert(compose_key(partition, key), value.to_vec());
        Ok(())
    }

    fn delete(&self, partition: &str, key: &[u8]) -> Result<()> {
        self.map.write().remove(&compose_key(partition, key));
        Ok(())
    }

    fn scan(&self, partition: &str) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let prefix = partition_prefix(partition);
        Ok(self
            .map
            .read()
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .map(|(k, v)| (k[prefix.len()..].to_vec(), v.clone()))
            .collect())
    }
}
