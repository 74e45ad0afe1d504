// Error taxonomy for workspace operations.
use sandboxdb_commons::IdentifierError;
use sandboxdb_sql::CompileError;
use sandboxdb_store::StorageError;
use thiserror::Error;

/// Every failure a workspace operation can surface.
///
/// Engine and client-input errors are returned as structured results at the
/// operation boundary, never raised further; `Introspection` and
/// `Persistence` are the server-side faults.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid workspace id: {0}")]
    InvalidIdentifier(#[from] IdentifierError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("schema compile error: {0}")]
    SchemaCompile(#[from] CompileError),

    /// Engine rejected the statement during the dry run; it was never
    /// actually executed.
    #[error("SQL syntax error: {message}")]
    Syntax { message: String, code: String },

    /// Engine rejected the statement on the real run, or any other engine
    /// failure.
    #[error("execution error: {message}")]
    Execution { message: String, code: String },

    #[error("introspection error: {0}")]
    Introspection(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("workspace not found: {0}")]
    NotFound(String),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }

    pub fn not_found(workspace_id: impl Into<String>) -> Self {
        CoreError::NotFound(workspace_id.into())
    }

    /// Wraps an engine error from the dry-run phase.
    pub fn syntax_from(err: &rusqlite::Error) -> Self {
        CoreError::Syntax {
            message: err.to_string(),
            code: engine_code(err),
        }
    }

    /// Wraps an engine error from the effectful phase.
    pub fn execution_from(err: &rusqlite::Error) -> Self {
        CoreError::Execution {
            message: err.to_string(),
            code: engine_code(err),
        }
    }

    pub fn introspection(err: impl std::fmt::Display) -> Self {
        CoreError::Introspection(err.to_string())
    }

    /// Client errors are the caller's fault (bad identifier, bad SQL, bad
    /// body, missing workspace); the rest are system faults.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            CoreError::Introspection(_) | CoreError::Persistence(_)
        )
    }

    /// Stable machine-readable code for the API surface.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::SchemaCompile(_) => "SCHEMA_COMPILE_ERROR",
            CoreError::Syntax { .. } => "SYNTAX_ERROR",
            CoreError::Execution { .. } => "EXECUTION_ERROR",
            CoreError::Introspection(_) => "INTROSPECTION_ERROR",
            CoreError::Persistence(_) => "PERSISTENCE_ERROR",
            CoreError::NotFound(_) => "NOT_FOUND",
        }
    }
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        CoreError::Persistence(err.to_string())
    }
}

/// Engine-specific error code, e.g. `SQLITE_1` for a generic SQL error or
/// `SQLITE_2067` for a unique-constraint violation.
pub(crate) fn engine_code(err: &rusqlite::Error) -> String {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => format!("SQLITE_{}", e.extended_code),
        _ => "GENERIC".to_string(),
    }
}
