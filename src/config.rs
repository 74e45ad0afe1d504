// Configuration module
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    #[serde(default)]
    pub engine: EngineSettings,
    pub logging: LoggingSettings,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// 0 means one worker per CPU core.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Storage settings: where namespaces and documents live on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory of the per-workspace SQLite database files.
    pub data_dir: String,
    /// RocksDB path for the workspace document store.
    pub document_store_path: String,
}

/// Relational engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Wall-clock bound for one caller statement, in milliseconds.
    #[serde(default = "default_statement_timeout_ms")]
    pub statement_timeout_ms: u64,

    /// How long a connection waits on a locked database file.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Connections per namespace pool.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    pub file_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            statement_timeout_ms: default_statement_timeout_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
            pool_size: default_pool_size(),
        }
    }
}

// Default value functions
fn default_workers() -> usize {
    0
}

fn default_statement_timeout_ms() -> u64 {
    5000
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

fn default_pool_size() -> u32 {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_true() -> bool {
    true
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let mut config: ServerConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides for deployment-specific settings.
    ///
    /// Supported environment variables:
    /// - SANDBOXDB_HOST: Override server.host
    /// - SANDBOXDB_PORT: Override server.port
    /// - SANDBOXDB_DATA_DIR: Override storage.data_dir
    /// - SANDBOXDB_DOCUMENT_STORE: Override storage.document_store_path
    /// - SANDBOXDB_LOG_LEVEL: Override logging.level
    /// - SANDBOXDB_STATEMENT_TIMEOUT_MS: Override engine.statement_timeout_ms
    fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        use std::env;

        if let Ok(host) = env::var("SANDBOXDB_HOST") {
            self.server.host = host;
        }
        if let Ok(port_str) = env::var("SANDBOXDB_PORT") {
            self.server.port = port_str
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid SANDBOXDB_PORT value: {}", port_str))?;
        }
        if let Ok(path) = env::var("SANDBOXDB_DATA_DIR") {
            self.storage.data_dir = path;
        }
        if let Ok(path) = env::var("SANDBOXDB_DOCUMENT_STORE") {
            self.storage.document_store_path = path;
        }
        if let Ok(level) = env::var("SANDBOXDB_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(ms) = env::var("SANDBOXDB_STATEMENT_TIMEOUT_MS") {
            self.engine.statement_timeout_ms = ms.parse().map_err(|_| {
                anyhow::anyhow!("Invalid SANDBOXDB_STATEMENT_TIMEOUT_MS value: {}", ms)
            })?;
        }

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        if self.engine.statement_timeout_ms == 0 {
            return Err(anyhow::anyhow!("statement_timeout_ms cannot be 0"));
        }
        if self.engine.pool_size == 0 {
            return Err(anyhow::anyhow!("pool_size cannot be 0"));
        }

        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 4000,
                workers: 0,
            },
            storage: StorageSettings {
                data_dir: "./data/namespaces".to_string(),
                document_store_path: "./data/documents".to_string(),
            },
            engine: EngineSettings::default(),
            logging: LoggingSettings {
                level: "info".to_string(),
                file_path: "./logs/server.log".to_string(),
                log_to_console: true,
                format: "compact".to_string(),
            },
        }
    }
}
