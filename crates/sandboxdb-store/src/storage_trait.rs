//! Generic key/value storage abstraction.

use thiserror::Error;

/// Storage-level errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Minimal partitioned key/value contract the document store needs.
///
/// A partition groups one entity type; keys are opaque bytes within it.
/// Implementations must be safe for concurrent use - the store is shared
/// across request handlers.
pub trait StorageBackend: Send + Sync {
    fn get(&self, partition: &str, key: &[u8]) -> Result<Option<Vec<u8>>>;

    fn put(&self, partition: &str, key: &[u8], value: &[u8]) -> Result<()>;

    /// Idempotent: deleting a missing key is not an error.
    fn delete(&self, partition: &str, key: &[u8]) -> Result<()>;

    /// All entries of a partition in key order.
    fn scan(&self, partition: &str) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;
}

/// Composes the physical key for a partition entry. `\x00` cannot appear in
/// partition names (they are static strings in this codebase), so the
/// composed keys of different partitions never collide.
pub(crate) fn compose_key(partition: &str, key: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(partition.len() + 1 + key.len());
    out.extend_from_slice(partition.as_bytes());
    out.push(0);
    out.extend_from_slice(key);
    out
}

/// Prefix shared by every key of a partition.
pub(crate) fn partition_prefix(partition: &str) -> Vec<u8> {
    compose_key(partition, &[])
}
