//! Workspace document store.

use crate::entity_store::EntityStore;
use crate::storage_trait::{Result, StorageBackend, StorageError};
use sandboxdb_commons::{WorkspaceDoc, WorkspaceId};
use std::sync::Arc;

const WORKSPACES_PARTITION: &str = "workspaces";

/// Durable store of workspace definitions, one JSON document per workspace
/// keyed by its id. The document is read and written whole; `updated_at` is
/// refreshed on every write.
pub struct WorkspaceStore {
    backend: Arc<dyn StorageBackend>,
}

impl EntityStore<WorkspaceId, WorkspaceDoc> for WorkspaceStore {
    fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn partition(&self) -> &str {
        WORKSPACES_PARTITION
    }
}

impl WorkspaceStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Persists a brand-new document. The workspace id is expected unique;
    /// a document already stored under it fails the create.
    pub fn create(&self, doc: &WorkspaceDoc) -> Result<()> {
        if self.get(&doc.workspace_id)?.is_some() {
            return Err(StorageError::AlreadyExists(
                doc.workspace_id.as_str().to_string(),
            ));
        }
        self.put(&doc.workspace_id, doc)
    }

    pub fn find(&self, id: &WorkspaceId) -> Result<Option<WorkspaceDoc>> {
        self.get(id)
    }

    /// Writes a document (insert or overwrite), stamping `updated_at`.
    pub fn save(&self, doc: &mut WorkspaceDoc) -> Result<()> {
        doc.touch();
        self.put(&doc.workspace_id, doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBackend;
    use sandboxdb_commons::TableDef;

    fn store() -> WorkspaceStore {
        WorkspaceStore::new(Arc::new(InMemoryBackend::new()))
    }

    fn doc(id: &str) -> WorkspaceDoc {
        WorkspaceDoc::new(WorkspaceId::parse(id).unwrap(), "Workspace", vec![])
    }

    #[test]
    fn test_create_then_find() {
        let store = store();
        let d = doc("ws1");
        store.create(&d).unwrap();

        let found = store.find(&d.workspace_id).unwrap().unwrap();
        assert_eq!(found.workspace_id, d.workspace_id);
        assert_eq!(found.name, "Workspace");
    }

    #[test]
    fn test_create_enforces_uniqueness() {
        let store = store();
        store.create(&doc("ws1")).unwrap();
        assert!(matches!(
            store.create(&doc("ws1")),
            Err(StorageError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_save_upserts_and_touches() {
        let store = store();
        let mut d = doc("ws1");
        let created_at = d.created_at;

        // Upsert without a prior create.
        store.save(&mut d).unwrap();

        d.tables.push(TableDef::new("users"));
        store.save(&mut d).unwrap();

        let found = store.find(&d.workspace_id).unwrap().unwrap();
        assert_eq!(found.tables.len(), 1);
        assert_eq!(found.created_at, created_at);
        assert!(found.updated_at >= created_at);
    }

    #[test]
    fn test_scan_all_returns_every_document() {
        let store = store();
        store.create(&doc("ws1")).unwrap();
        store.create(&doc("ws2")).unwrap();

        let mut ids: Vec<String> = store
            .scan_all()
            .unwrap()
            .into_iter()
            .map(|d| d.workspace_id.as_str().to_string())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["ws1", "ws2"]);
    }

    #[test]
    fn test_find_missing_is_none() {
        let store = store();
        assert!(store
            .find(&WorkspaceId::parse("nope").unwrap())
            .unwrap()
            .is_none());
    }
}
