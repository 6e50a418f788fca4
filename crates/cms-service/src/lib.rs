#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! CMS Service Library
//!
//! Business rules for contacts: paging and search requests, partial updates,
//! not-found reporting, and entity to transfer-object mapping. The service
//! owns its store through constructor injection.

mod contacts;

pub use contacts::ContactService;
