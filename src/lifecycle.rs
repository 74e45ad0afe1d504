//! Server lifecycle: build shared components, run the HTTP server.

use crate::config::ServerConfig;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use log::info;
use sandboxdb_api::configure_routes;
use sandboxdb_core::{EngineOptions, SessionManager, WorkspaceService};
use sandboxdb_store::{RocksDbBackend, WorkspaceStore};
use std::sync::Arc;

/// Builds the workspace service from configuration: document store on
/// RocksDB, engine sessions on the SQLite data directory.
pub fn bootstrap(config: &ServerConfig) -> Result<Arc<WorkspaceService>> {
    let backend = RocksDbBackend::open(&config.storage.document_store_path)
        .context("opening document store")?;
    let store = WorkspaceStore::new(Arc::new(backend));

    let options = EngineOptions {
        pool_size: config.engine.pool_size,
        busy_timeout_ms: config.engine.busy_timeout_ms,
        statement_timeout_ms: config.engine.statement_timeout_ms,
    };
    let sessions = SessionManager::new(&config.storage.data_dir, options)
        .context("opening namespace data dir")?;

    Ok(Arc::new(WorkspaceService::new(store, sessions)))
}

/// Runs the HTTP server until termination.
pub async fn run(config: &ServerConfig, service: Arc<WorkspaceService>) -> Result<()> {
    let workers = if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    };

    info!(
        "listening on {}:{} with {} workers",
        config.server.host, config.server.port, workers
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(service.clone()))
            .configure(configure_routes)
    })
    .workers(workers)
    .bind((config.server.host.as_str(), config.server.port))
    .with_context(|| format!("binding {}:{}", config.server.host, config.server.port))?
    .run()
    .await?;

    info!("server stopped");
    Ok(())
}
