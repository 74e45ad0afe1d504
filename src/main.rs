// SandboxDB Server entrypoint
//!
//! Initialization and server wiring live in dedicated modules so this file
//! remains a thin orchestrator.

use anyhow::Result;
use log::info;
use sandboxdb_server::config::ServerConfig;
use sandboxdb_server::lifecycle::{bootstrap, run};
use sandboxdb_server::logging;

#[actix_web::main]
async fn main() -> Result<()> {
    let config_path = "config.toml";
    let config = if std::path::Path::new(config_path).exists() {
        match ServerConfig::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("FATAL: failed to load {}: {}", config_path, e);
                std::process::exit(1);
            }
        }
    } else {
        eprintln!("no {} found, using built-in defaults", config_path);
        ServerConfig::default()
    };

    // Logging before any other side effects.
    logging::init_logging(
        &config.logging.level,
        &config.logging.file_path,
        config.logging.log_to_console,
        &config.logging.format,
    )?;

    info!(
        "SandboxDB Server v{} starting on {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.server.host,
        config.server.port
    );

    let service = bootstrap(&config)?;
    run(&config, service).await
}
