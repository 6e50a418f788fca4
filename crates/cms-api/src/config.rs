//! Application configuration.
//!
//! Loaded from TOML. Resolution order for the file: an explicit path
//! (`--config` / `CMS_CONFIG`), otherwise `<config dir>/cms/config.toml`.
//! A missing file means defaults. Command-line flags override file values.

use std::path::{Path, PathBuf};

use cms_core::{Error, Result};
use cms_storage::StoreConfig;
use serde::{Deserialize, Serialize};

const PROJECT_NAME: &str = "cms";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Contact store settings.
    #[serde(default)]
    pub database: StoreConfig,

    /// Listing limits.
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings (`[server]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to bind (0 picks a free port).
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Listing limits (`[pagination]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when a request omits `size`.
    #[serde(default = "default_page_size")]
    pub default_size: u32,

    /// Largest accepted `size`.
    #[serde(default = "default_max_page_size")]
    pub max_size: u32,
}

fn default_page_size() -> u32 {
    10
}

fn default_max_page_size() -> u32 {
    100
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_size: default_page_size(),
            max_size: default_max_page_size(),
        }
    }
}

impl PaginationConfig {
    /// Rejects a requested page size above `max_size`.
    pub fn check_size(&self, size: u32) -> Result<()> {
        if size > self.max_size {
            return Err(Error::validation_field(
                "size",
                format!("page size must not exceed {}", self.max_size),
            ));
        }
        Ok(())
    }
}

/// Log output settings (`[logging]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info,cms_api=debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl ApiConfig {
    /// Project name used for the config directory and CLI hints.
    pub fn project_name() -> &'static str {
        PROJECT_NAME
    }

    /// Platform default config file location, if the platform has one.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// Explicit path if given, otherwise the platform default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        match explicit {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// Loads configuration, falling back to defaults when no file exists.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) if explicit.is_some() => Err(Error::config(format!(
                "Config file not found at {}",
                path.display()
            ))),
            _ => Ok(Self::default()),
        }
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Environment variables equivalent to this configuration.
    pub fn to_env_vars(&self) -> Vec<(String, String)> {
        vec![
            ("CMS_HOST".to_string(), self.server.host.clone()),
            ("CMS_PORT".to_string(), self.server.port.to_string()),
            ("CMS_DATABASE_URL".to_string(), self.database.url.clone()),
        ]
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
