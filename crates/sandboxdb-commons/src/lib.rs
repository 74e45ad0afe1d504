//! # sandboxdb-commons
//!
//! Shared types for SandboxDB: type-safe identifiers and the abstract
//! workspace data model.
//!
//! This crate is the single source of truth for the document shapes that the
//! store persists and the engine materializes. It deliberately carries no
//! engine or storage dependencies so every other crate can depend on it
//! without cycles.
//!
//! ## Type-Safe Wrappers
//!
//! - `WorkspaceId`: validated workspace identifier
//! - `Namespace`: live isolation boundary derived from a `WorkspaceId`
//!
//! ## Example Usage
//!
//! ```rust
//! use sandboxdb_commons::{Namespace, WorkspaceId};
//!
//! let id = WorkspaceId::parse("workspace_1").unwrap();
//! let ns = Namespace::for_workspace(&id);
//! assert_eq!(ns.as_str(), "workspace_workspace_1");
//! ```

pub mod ids;
pub mod models;

pub use ids::{IdentifierError, Namespace, StorageKey, WorkspaceId};
pub use models::{ColumnDef, DataType, Row, TableDef, WorkspaceDoc};
