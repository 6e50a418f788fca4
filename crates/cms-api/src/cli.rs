//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};

use crate::config::ApiConfig;
use cms_storage::StoreBackend;

/// CMS - contact management backend
#[derive(Parser, Debug)]
#[command(name = "cms", version)]
#[command(about = "Contact management backend", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CMS_CONFIG", global = true)]
    pub config: Option<String>,

    /// Listener and store overrides (used by `serve`)
    #[command(flatten)]
    pub serve: ServeArgs,

    /// Subcommand; `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Configuration management
    Config {
        /// Config action to run
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print a value by dotted key (e.g. `server.port`)
    Get {
        /// Dotted key
        key: String,
    },
    /// Write a default config file
    Init {
        /// Target file (defaults to the platform config path)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration as environment variables
    Export {
        /// Format as `--env KEY=VALUE` for `docker run`
        #[arg(long)]
        docker_env: bool,
    },
}

/// Overrides applied on top of the loaded configuration.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long, env = "CMS_HOST", global = true)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(long, env = "CMS_PORT", global = true)]
    pub port: Option<u16>,

    /// SQLite connection URL
    #[arg(long, env = "CMS_DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Keep contacts in memory instead of SQLite
    #[arg(long, global = true)]
    pub memory: bool,
}

impl ServeArgs {
    /// Writes every supplied override into `config`.
    pub fn apply_to(&self, config: &mut ApiConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        if self.memory {
            config.database.backend = StoreBackend::Memory;
        }
    }
}
