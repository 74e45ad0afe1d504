//! Shared fixtures for integration tests.
#![allow(dead_code)] // each test binary uses its own subset

use sandboxdb_commons::{ColumnDef, Namespace, TableDef, WorkspaceId};
use sandboxdb_core::{EngineOptions, SessionManager, WorkspaceService};
use sandboxdb_store::{InMemoryBackend, WorkspaceStore};
use serde_json::json;
use std::sync::Arc;

pub struct TestContext {
    pub dir: tempfile::TempDir,
    pub service: WorkspaceService,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let sessions = SessionManager::new(dir.path(), EngineOptions::default()).unwrap();
        let store = WorkspaceStore::new(Arc::new(InMemoryBackend::new()));
        Self {
            dir,
            service: WorkspaceService::new(store, sessions),
        }
    }

    /// A second session manager over the same data directory, for observing
    /// the live namespace independently of the service under test.
    pub fn observer(&self) -> SessionManager {
        SessionManager::new(self.dir.path(), EngineOptions::default()).unwrap()
    }

    pub fn namespace(&self, workspace_id: &str) -> Namespace {
        Namespace::for_workspace(&WorkspaceId::parse(workspace_id).unwrap())
    }
}

pub mod fixtures {
    use super::*;

    /// users(id INTEGER PK AUTOINCREMENT, name TEXT NOT NULL, email TEXT UNIQUE)
    /// with two sample rows.
    pub fn users_table() -> TableDef {
        let mut id = ColumnDef::new("id", "INTEGER");
        id.primary_key = true;
        id.auto_increment = true;
        let mut name = ColumnDef::new("name", "TEXT");
        name.not_null = true;
        let mut email = ColumnDef::new("email", "TEXT");
        email.unique = true;

        let mut t = TableDef::new("users");
        t.columns = vec![id, name, email];
        t.rows = vec![
            vec![serde_json::Value::Null, json!("Alice"), json!("alice@example.com")],
            vec![serde_json::Value::Null, json!("Bob"), json!("bob@example.com")],
        ];
        t
    }

    /// tags(label TEXT DEFAULT 'untagged') with one row relying on the default.
    pub fn tags_table() -> TableDef {
        let mut label = ColumnDef::new("label", "TEXT");
        label.default_value = json!("untagged");

        let mut t = TableDef::new("tags");
        t.columns = vec![label];
        t.rows = vec![vec![serde_json::Value::Null], vec![json!("rust")]];
        t
    }

    pub fn simple_table(name: &str, columns: &[&str]) -> TableDef {
        let mut t = TableDef::new(name);
        t.columns = columns.iter().map(|c| ColumnDef::new(*c, "TEXT")).collect();
        t
    }
}
