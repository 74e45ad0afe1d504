//! # sandboxdb-store
//!
//! Durable document storage for workspace definitions.
//!
//! ## Architecture
//!
//! ```text
//! WorkspaceStore           ← workspace documents, uniqueness, timestamps
//!     ↓
//! EntityStore<K, V>        ← typed CRUD with JSON serialization
//!     ↓
//! StorageBackend           ← generic partition/key/value operations
//!     ↓
//! RocksDB / in-memory      ← actual storage implementation
//! ```
//!
//! The backend trait keeps the store swappable: production runs on RocksDB,
//! tests use [`memory::InMemoryBackend`].

pub mod entity_store;
pub mod memory;
pub mod rocksdb_impl;
pub mod storage_trait;
pub mod workspace_store;

pub use entity_store::EntityStore;
pub use memory::InMemoryBackend;
pub use rocksdb_impl::RocksDbBackend;
pub use storage_trait::{StorageBackend, StorageError};
pub use workspace_store::WorkspaceStore;
