//! # cms-api
//!
//! HTTP API and command-line entry point for the contact management backend.
//!
//! This crate provides:
//! - REST endpoints under `/api/contacts` plus a `/health` probe
//! - Mapping of domain errors to HTTP status codes and JSON bodies
//! - TOML configuration with command-line and environment overrides
//! - The `cms` binary (`serve` and `config` subcommands)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod logging;
pub mod routes;
pub mod server;

pub use config::ApiConfig;
pub use error::{Error, Result};
pub use routes::{AppState, router};
pub use server::Server;
