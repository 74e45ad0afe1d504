//! Request bodies.

use sandboxdb_commons::TableDef;
use serde::Deserialize;

/// Body of `POST /api/workspaces`.
///
/// ```json
/// {
///   "workspaceId": "ws1",
///   "name": "My workspace",
///   "tables": [{"tableName": "users", "columns": [...], "rows": [...]}]
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspaceRequest {
    #[serde(default)]
    pub workspace_id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub tables: Vec<TableDef>,
}

/// Body of `POST /api/workspaces/{id}/save`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWorkspaceRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub tables: Vec<TableDef>,
}

/// Body of `POST /api/execute`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    #[serde(default)]
    pub workspace_id: Option<String>,

    #[serde(default)]
    pub sql: Option<String>,
}
