#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! CMS Core Library
//!
//! Data model, page model, boundary validation, and errors shared by the
//! contact store, service, and HTTP crates.

pub mod error;
pub mod types;

// Re-exports for convenience
pub use error::{Error, Result};
pub use types::{
    Contact, ContactDto, ContactId, CreateContactRequest, NewContact, Page, PageRequest, Sort,
    SortDirection, SortField,
};
