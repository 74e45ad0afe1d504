//! # sandboxdb-core
//!
//! The workspace schema synchronization and SQL execution engine.
//!
//! Two sources of truth exist for a workspace: the persisted document
//! (`sandboxdb-store`) and the live SQLite namespace. They are synchronized
//! only at explicit operation boundaries - create, load, save, and mutating
//! execute - and are allowed to diverge in between. [`WorkspaceService`] is
//! that boundary: every public operation validates the workspace identifier,
//! checks out one engine session for its whole duration, and maps every
//! failure into the [`CoreError`] taxonomy.

pub mod engine;
pub mod error;
pub mod execution;
pub mod reconcile;
pub mod service;

pub use engine::session::{EngineOptions, Session, SessionManager};
pub use error::CoreError;
pub use execution::{ColumnMeta, StatementOutput};
pub use service::{ExecutionOutcome, WorkspaceService};
