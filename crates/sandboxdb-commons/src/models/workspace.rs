//! Persisted workspace document.

use super::TableDef;
use crate::ids::WorkspaceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The whole persisted state of one workspace, stored as a single document
/// keyed by `workspace_id`. The store rewrites the document on every save;
/// `updated_at` is refreshed on each write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceDoc {
    pub workspace_id: WorkspaceId,
    pub name: String,

    #[serde(default)]
    pub tables: Vec<TableDef>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkspaceDoc {
    pub fn new(workspace_id: WorkspaceId, name: impl Into<String>, tables: Vec<TableDef>) -> Self {
        let now = Utc::now();
        Self {
            workspace_id,
            name: name.into(),
            tables,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stamps the document as modified.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
