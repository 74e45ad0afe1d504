//! Response bodies.

use sandboxdb_commons::WorkspaceDoc;
use sandboxdb_core::{ColumnMeta, ExecutionOutcome};
use serde::Serialize;
use serde_json::{Map, Value};

/// Error payload shared by every endpoint.
///
/// ```json
/// { "ok": false, "error": "SQL syntax error: ...", "code": "SYNTAX_ERROR" }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    pub code: String,

    /// Engine-reported code (e.g. `SQLITE_1`) when the failure came from the
    /// relational engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_code: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: message.into(),
            code: code.into(),
            engine_code: None,
        }
    }

    pub fn from_core(err: &sandboxdb_core::CoreError) -> Self {
        use sandboxdb_core::CoreError;
        let engine_code = match err {
            CoreError::Syntax { code, .. } | CoreError::Execution { code, .. } => {
                Some(code.clone())
            }
            _ => None,
        };
        Self {
            ok: false,
            error: err.to_string(),
            code: err.code().to_string(),
            engine_code,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspaceResponse {
    pub ok: bool,
    pub workspace_id: String,
    pub namespace: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceResponse {
    pub ok: bool,
    pub workspace: WorkspaceDoc,
}

impl WorkspaceResponse {
    pub fn new(workspace: WorkspaceDoc) -> Self {
        Self {
            ok: true,
            workspace,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadWorkspaceResponse {
    pub ok: bool,
    pub namespace: String,
}

/// Name and declared type of one result column.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
}

impl From<ColumnMeta> for ColumnInfo {
    fn from(meta: ColumnMeta) -> Self {
        Self {
            name: meta.name,
            data_type: meta.data_type,
        }
    }
}

/// Successful execution result.
///
/// ```json
/// {
///   "ok": true,
///   "rows": [{"id": 1, "name": "Alice"}],
///   "rowCount": 1,
///   "columns": [{"name": "id", "dataType": "INTEGER"}],
///   "durationMs": 3,
///   "resynced": false
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    pub ok: bool,
    pub rows: Vec<Map<String, Value>>,
    pub row_count: usize,
    pub columns: Vec<ColumnInfo>,
    pub duration_ms: u64,
    pub resynced: bool,
}

impl From<ExecutionOutcome> for ExecuteResponse {
    fn from(outcome: ExecutionOutcome) -> Self {
        Self {
            ok: true,
            rows: outcome.rows,
            row_count: outcome.row_count,
            columns: outcome.columns.into_iter().map(ColumnInfo::from).collect(),
            duration_ms: outcome.duration_ms,
            resynced: outcome.resynced,
        }
    }
}
