//! Engine sessions: one pooled SQLite connection per logical operation.
//!
//! Each namespace is one database file under the data directory; the file is
//! the isolation boundary between workspaces. A [`Session`] owns its pooled
//! connection for the whole logical operation, so session-scoped state (the
//! active namespace, the statement timeout) stays consistent from checkout
//! to drop, on every exit path.

use crate::error::CoreError;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use sandboxdb_commons::Namespace;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Engine tuning knobs, loaded from server configuration.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Connections per namespace pool.
    pub pool_size: u32,
    /// How long a connection waits on a locked database file.
    pub busy_timeout_ms: u64,
    /// Wall-clock bound for one caller statement.
    pub statement_timeout_ms: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            pool_size: 4,
            busy_timeout_ms: 5_000,
            statement_timeout_ms: 5_000,
        }
    }
}

/// Hands out [`Session`]s, lazily building one connection pool per
/// namespace.
pub struct SessionManager {
    data_dir: PathBuf,
    options: EngineOptions,
    pools: DashMap<Namespace, Pool<SqliteConnectionManager>>,
}

impl SessionManager {
    pub fn new(data_dir: impl Into<PathBuf>, options: EngineOptions) -> Result<Self, CoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir).map_err(|e| {
            CoreError::Execution {
                message: format!("cannot create data dir {}: {}", data_dir.display(), e),
                code: "DATA_DIR".to_string(),
            }
        })?;
        Ok(Self {
            data_dir,
            options,
            pools: DashMap::new(),
        })
    }

    pub fn statement_timeout(&self) -> Duration {
        Duration::from_millis(self.options.statement_timeout_ms)
    }

    fn pool_for(&self, ns: &Namespace) -> Result<Pool<SqliteConnectionManager>, CoreError> {
        if let Some(pool) = self.pools.get(ns) {
            return Ok(pool.clone());
        }
        match self.pools.entry(ns.clone()) {
            Entry::Occupied(e) => Ok(e.get().clone()),
            Entry::Vacant(v) => {
                let path = self.data_dir.join(format!("{}.db", ns.as_str()));
                let busy_timeout = Duration::from_millis(self.options.busy_timeout_ms);
                let manager = SqliteConnectionManager::file(&path).with_init(move |conn| {
                    conn.pragma_update(None, "journal_mode", "wal")?;
                    conn.busy_timeout(busy_timeout)?;
                    Ok(())
                });
                let pool = Pool::builder()
                    .max_size(self.options.pool_size)
                    .build(manager)
                    .map_err(|e| CoreError::Execution {
                        message: format!("cannot open namespace {}: {}", ns, e),
                        code: "POOL".to_string(),
                    })?;
                log::debug!("opened namespace {} at {}", ns, path.display());
                v.insert(pool.clone());
                Ok(pool)
            }
        }
    }

    /// Checks out one connection for a whole logical operation.
    pub fn checkout(&self, ns: &Namespace) -> Result<Session, CoreError> {
        let pool = self.pool_for(ns)?;
        let conn = pool.get().map_err(|e| CoreError::Execution {
            message: format!("no connection available for {}: {}", ns, e),
            code: "POOL".to_string(),
        })?;
        Ok(Session {
            conn,
            namespace: ns.clone(),
        })
    }
}

/// One checked-out engine connection, scoped to a namespace. Returned to its
/// pool on drop.
pub struct Session {
    conn: PooledConnection<SqliteConnectionManager>,
    namespace: Namespace,
}

impl Session {
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn conn(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Bounds caller SQL by wall clock. Installed before any caller SQL runs
    /// so a runaway statement cannot hold the connection indefinitely; the
    /// engine aborts the statement with an interrupt error once exceeded.
    pub fn install_statement_timeout(&mut self, timeout: Duration) {
        let started = Instant::now();
        self.conn
            .progress_handler(100, Some(move || started.elapsed() > timeout));
    }

    pub fn clear_statement_timeout(&mut self) {
        self.conn.progress_handler(0, None::<fn() -> bool>);
    }
}
