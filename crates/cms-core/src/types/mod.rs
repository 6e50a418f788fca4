//! Core types for contacts and paged results.

mod contact;
mod ids;
mod page;
mod proptests;

pub use contact::{Contact, ContactDto, CreateContactRequest, NewContact};
pub use ids::ContactId;
pub use page::{Page, PageRequest, Sort, SortDirection, SortField};
