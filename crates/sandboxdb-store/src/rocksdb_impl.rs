//! RocksDB storage backend.

use crate::storage_trait::{compose_key, partition_prefix, Result, StorageBackend, StorageError};
use rocksdb::{Direction, IteratorMode, Options, DB};
use std::path::Path;

/// RocksDB-backed implementation of [`StorageBackend`].
///
/// Partitions are encoded as key prefixes inside the default column family;
/// the document volume here (one document per workspace) does not warrant
/// per-partition column families.
pub struct RocksDbBackend {
    db: DB,
}

impl RocksDbBackend {
    /// Opens (or creates) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path.as_ref())
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        log::info!(
            "Opened document store at {}",
            path.as_ref().display()
        );
        Ok(Self { db })
    }
}

impl StorageBackend for RocksDbBackend {
    fn get(&self, partition: &str, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.db
            .get(compose_key(partition, key))
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    fn put(&self, partition: &str, key: &[u8], value: &[u8]) -> Result<()> {
        self.db
            .put(compose_key(partition, key), value)
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    fn delete(&self, partition: &str, key: &[u8]) -> Result<()> {
        self.db
            .delete(compose_key(partition, key))
            .map_err(|e| StorageError::Backend(e.to_string()))
    }

    fn scan(&self, partition: &str) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let prefix = partition_prefix(partition);
        let mut out = Vec::new();
        for item in self
            .db
            .iterator(IteratorMode::From(&prefix, Direction::Forward))
        {
            let (key, value) = item.map_err(|e| StorageError::Backend(e.to_string()))?;
            if !key.starts_with(&prefix) {
                break;
            }
            out.push((key[prefix.len()..].to_vec(), value.to_vec()));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rocksdb_round_trip_and_partition_isolation() {
        let dir = tempfile::tempdir().unwrap();
        let backend = RocksDbBackend::open(dir.path().join("docs")).unwrap();

        backend.put("a", b"k1", b"v1").unwrap();
        backend.put("b", b"k1", b"other").unwrap();

        assert_eq!(backend.get("a", b"k1").unwrap(), Some(b"v1".to_vec()));
        assert_eq!(backend.get("b", b"k1").unwrap(), Some(b"other".to_vec()));

        let scanned = backend.scan("a").unwrap();
        assert_eq!(scanned, vec![(b"k1".to_vec(), b"v1".to_vec())]);

        backend.delete("a", b"k1").unwrap();
        assert_eq!(backend.get("a", b"k1").unwrap(), None);
        // Idempotent delete.
        backend.delete("a", b"k1").unwrap();
    }
}
