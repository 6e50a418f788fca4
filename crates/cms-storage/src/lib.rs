//! # cms-storage
//!
//! Contact store backends for the CMS backend.
//!
//! This crate provides:
//! - The [`ContactStore`] abstraction
//! - [`ContactQuery`], the filter + sort + offset/limit builder for paged scans
//! - SQLite storage via `sqlx` ([`SqliteContactStore`])
//! - In-memory storage for tests and ephemeral runs ([`MemoryContactStore`])
//! - [`StoreConfig`] and the [`open_store`] factory

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod database;
pub mod memory;
pub mod query;
pub mod traits;

pub use config::{StoreBackend, StoreConfig, open_store};
pub use database::SqliteContactStore;
pub use memory::MemoryContactStore;
pub use query::{ContactQuery, SearchFilter};
pub use traits::{ContactMutation, ContactStore};
