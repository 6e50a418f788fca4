//! Contact store abstraction.

use async_trait::async_trait;
use cms_core::{Contact, ContactId, Page, Result};

use crate::query::ContactQuery;

/// In-place edit applied to a loaded contact inside a store transaction.
pub type ContactMutation<'a> = &'a (dyn Fn(&mut Contact) + Send + Sync);

/// Durable keyed storage of contact records.
///
/// Absence is a normal outcome: lookups return `Ok(None)`/`Ok(false)` rather
/// than an error, and callers decide whether a missing record is a failure.
///
/// # Implementations
///
/// - [`SqliteContactStore`](crate::SqliteContactStore): `sqlx` over SQLite
/// - [`MemoryContactStore`](crate::MemoryContactStore): ordered map behind a lock
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Returns the contact with `id`, if any.
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>>;

    /// Returns whether a contact with `id` exists, without loading it.
    async fn exists_by_id(&self, id: ContactId) -> Result<bool>;

    /// Inserts `contact` when it has no identifier, otherwise overwrites the
    /// row with its identifier. Returns the persisted state with the
    /// identifier populated.
    async fn save(&self, contact: Contact) -> Result<Contact>;

    /// Removes the contact with `id`.
    ///
    /// Deleting an absent id is not an error here; callers that need
    /// not-found semantics must check [`exists_by_id`](Self::exists_by_id) first.
    async fn delete_by_id(&self, id: ContactId) -> Result<()>;

    /// Returns every contact in no particular order.
    async fn find_all(&self) -> Result<Vec<Contact>>;

    /// Returns one page of contacts matching `query`'s optional filter, in
    /// its sort order, together with the total match count.
    async fn find_all_paged_filtered(&self, query: &ContactQuery) -> Result<Page<Contact>>;

    /// Loads the contact with `id`, applies `mutation`, and saves the result
    /// as one atomic unit.
    ///
    /// Returns `Ok(None)` without writing anything when `id` does not exist.
    /// Concurrent readers never observe a partially applied mutation.
    async fn update_in_transaction(
        &self,
        id: ContactId,
        mutation: ContactMutation<'_>,
    ) -> Result<Option<Contact>>;

    /// Short backend name used in logs and health reports.
    fn backend_name(&self) -> &'static str;
}
