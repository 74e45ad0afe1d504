//! Workspace operations: the synchronization boundary between the persisted
//! definition and the live namespace.

use crate::engine::introspect::introspect;
use crate::engine::materialize::{apply_incoming_tables, materialize_tables, rebuild_namespace};
use crate::engine::session::SessionManager;
use crate::error::CoreError;
use crate::execution::{run_statement, ColumnMeta};
use crate::reconcile::merge_tables;
use sandboxdb_commons::{Namespace, TableDef, WorkspaceDoc, WorkspaceId};
use sandboxdb_store::WorkspaceStore;
use serde_json::{Map, Value};

/// Result of one `execute` operation.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub rows: Vec<Map<String, Value>>,
    pub row_count: usize,
    pub columns: Vec<ColumnMeta>,
    pub duration_ms: u64,
    /// Whether the persisted definition was overwritten from a fresh
    /// introspection because the statement classified as mutating.
    pub resynced: bool,
}

/// The core's operation surface. Thin request handlers call these five
/// operations and nothing else.
///
/// Operations on different workspaces are independent - the namespace is the
/// concurrency boundary. Within one workspace there is no mutual exclusion
/// across concurrent calls; callers race on both the live namespace and the
/// document (known gap, inherited from the original design).
pub struct WorkspaceService {
    store: WorkspaceStore,
    sessions: SessionManager,
}

impl WorkspaceService {
    pub fn new(store: WorkspaceStore, sessions: SessionManager) -> Self {
        Self { store, sessions }
    }

    fn validated(&self, raw_id: &str) -> Result<(WorkspaceId, Namespace), CoreError> {
        let id = WorkspaceId::parse(raw_id)?;
        let namespace = Namespace::for_workspace(&id);
        Ok((id, namespace))
    }

    /// Materializes the initial definition and persists the document. The
    /// workspace id is expected unique; a duplicate fails with a persistence
    /// error before the store is touched a second time.
    pub fn create_workspace(
        &self,
        raw_id: &str,
        name: Option<&str>,
        mut tables: Vec<TableDef>,
    ) -> Result<(WorkspaceDoc, Namespace), CoreError> {
        let (id, namespace) = self.validated(raw_id)?;
        for table in &mut tables {
            table.normalize();
        }

        let mut session = self.sessions.checkout(&namespace)?;
        materialize_tables(session.conn(), &tables)?;
        drop(session);

        let doc = WorkspaceDoc::new(id.clone(), name.unwrap_or("Workspace"), tables);
        self.store.create(&doc)?;

        log::info!("created workspace {} in {}", id, namespace);
        Ok((doc, namespace))
    }

    pub fn get_workspace(&self, raw_id: &str) -> Result<WorkspaceDoc, CoreError> {
        let (id, _) = self.validated(raw_id)?;
        self.store
            .find(&id)?
            .ok_or_else(|| CoreError::not_found(id.as_str()))
    }

    /// Destructive rebuild of the live namespace from the persisted
    /// definition. Live-only changes are discarded.
    pub fn load_workspace(&self, raw_id: &str) -> Result<Namespace, CoreError> {
        let (id, namespace) = self.validated(raw_id)?;
        let doc = self
            .store
            .find(&id)?
            .ok_or_else(|| CoreError::not_found(id.as_str()))?;

        let mut session = self.sessions.checkout(&namespace)?;
        rebuild_namespace(session.conn(), &doc.tables)?;

        log::info!("loaded workspace {} into {}", id, namespace);
        Ok(namespace)
    }

    /// Merge-on-save: incoming tables win by name, persisted tables absent
    /// from the incoming set are preserved, and the live namespace is
    /// updated additively. Creates the document if absent.
    pub fn save_workspace(
        &self,
        raw_id: &str,
        name: Option<&str>,
        mut incoming: Vec<TableDef>,
    ) -> Result<WorkspaceDoc, CoreError> {
        let (id, namespace) = self.validated(raw_id)?;
        for table in &mut incoming {
            table.normalize();
        }

        let mut session = self.sessions.checkout(&namespace)?;
        apply_incoming_tables(session.conn(), &incoming)?;
        drop(session);

        let existing = self.store.find(&id)?;
        let mut doc = match existing {
            Some(mut doc) => {
                doc.tables = merge_tables(&doc.tables, &incoming);
                if let Some(name) = name {
                    doc.name = name.to_string();
                }
                doc
            }
            None => WorkspaceDoc::new(
                id.clone(),
                name.map(str::to_string)
                    .unwrap_or_else(|| format!("Workspace {}", id)),
                incoming,
            ),
        };
        self.store.save(&mut doc)?;

        log::info!("saved workspace {} ({} tables)", id, doc.tables.len());
        Ok(doc)
    }

    /// Runs one SQL statement (or batch) inside the workspace's namespace.
    /// A statement that classifies as mutating triggers a resync: the
    /// persisted `tables` is wholly replaced by a fresh introspection.
    pub fn execute(&self, raw_id: &str, sql: &str) -> Result<ExecutionOutcome, CoreError> {
        let (id, namespace) = self.validated(raw_id)?;
        if sql.trim().is_empty() {
            return Err(CoreError::validation("sql is required"));
        }

        // One connection for the dry run, the real run, and the resync read,
        // so session-scoped state is consistent for the whole execution.
        let mut session = self.sessions.checkout(&namespace)?;
        let output = run_statement(&mut session, sql, self.sessions.statement_timeout())?;

        let mut resynced = false;
        if output.kind.is_mutating() {
            let tables = introspect(session.conn())?;
            let mut doc = match self.store.find(&id)? {
                Some(doc) => doc,
                // Executing against a workspace that was never persisted
                // still resyncs; the document springs into existence.
                None => WorkspaceDoc::new(id.clone(), format!("Workspace {}", id), Vec::new()),
            };
            doc.tables = tables;
            self.store.save(&mut doc)?;
            resynced = true;
            log::debug!("resynced workspace {} after mutation", id);
        }

        Ok(ExecutionOutcome {
            rows: output.rows,
            row_count: output.row_count,
            columns: output.columns,
            duration_ms: output.duration_ms,
            resynced,
        })
    }
}
