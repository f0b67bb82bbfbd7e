//! Environment-driven server configuration.

use std::env;

/// Which persistence adapter backs the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Diesel/SQLite database (default).
    Sqlite,
    /// In-memory store persisted to a JSON snapshot file.
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub storage: StorageBackend,
    pub db_path: String,
    pub data_dir: String,
    /// Base URL to self-ping so free-tier hosts don't idle the service out.
    /// Disabled when unset.
    pub keep_alive_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let data_dir = env::var("SPENDWISE_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        let storage = match env::var("SPENDWISE_STORAGE").as_deref() {
            Ok("memory") => StorageBackend::Memory,
            _ => StorageBackend::Sqlite,
        };
        Config {
            listen_addr: env::var("SPENDWISE_LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            storage,
            db_path: env::var("SPENDWISE_DB_PATH")
                .unwrap_or_else(|_| format!("{}/spendwise.db", data_dir)),
            data_dir,
            keep_alive_url: env::var("SPENDWISE_KEEP_ALIVE_URL").ok(),
        }
    }
}
