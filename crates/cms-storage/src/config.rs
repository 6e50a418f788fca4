//! Store configuration and factory.

use std::sync::Arc;

use cms_core::Result;
use serde::{Deserialize, Serialize};

use crate::database::SqliteContactStore;
use crate::memory::MemoryContactStore;
use crate::traits::ContactStore;

/// Which store implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// SQLite database via `sqlx`.
    #[default]
    Sqlite,
    /// Process memory; contents are lost on exit.
    Memory,
}

/// Store configuration (`[database]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend type: "sqlite" or "memory".
    #[serde(default)]
    pub backend: StoreBackend,

    /// SQLite connection URL (ignored by the memory backend).
    #[serde(default = "default_url")]
    pub url: String,

    /// Connection pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_url() -> String {
    "sqlite://contacts.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: default_url(),
            max_connections: default_max_connections(),
        }
    }
}

/// Opens the store described by `config`.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn ContactStore>> {
    let store: Arc<dyn ContactStore> = match config.backend {
        StoreBackend::Sqlite => {
            Arc::new(SqliteContactStore::connect(&config.url, config.max_connections).await?)
        }
        StoreBackend::Memory => Arc::new(MemoryContactStore::new()),
    };
    tracing::info!(backend = store.backend_name(), "Contact store ready");
    Ok(store)
}
