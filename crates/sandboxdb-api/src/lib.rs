//! # sandboxdb-api
//!
//! HTTP surface for SandboxDB. Handlers are deliberately thin: validate the
//! request body, hand off to [`WorkspaceService`], map the error taxonomy to
//! status codes. Everything with real invariants lives in `sandboxdb-core`.
//!
//! [`WorkspaceService`]: sandboxdb_core::WorkspaceService

pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::configure_routes;
