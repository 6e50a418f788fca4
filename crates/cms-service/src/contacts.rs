//! Contact service.

use std::sync::Arc;

use cms_core::{
    Contact, ContactDto, ContactId, CreateContactRequest, Error, NewContact, Page, PageRequest,
    Result, Sort, SortDirection, SortField,
};
use cms_storage::{ContactQuery, ContactStore};

/// Contact business logic over a [`ContactStore`].
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
}

impl ContactService {
    /// Creates a service backed by `store`.
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    /// Name of the backing store, for health reporting.
    pub fn store_backend(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Returns one page of contacts.
    ///
    /// `sort_dir` is descending only for a case-insensitive `"desc"`. A
    /// present, non-blank `search` restricts results to contacts whose name
    /// or email contains it, ignoring case. Fails with a validation error
    /// for an unknown `sort_by` or a zero `size`.
    pub async fn get_contacts_paged_filtered(
        &self,
        page: u32,
        size: u32,
        search: Option<&str>,
        sort_by: &str,
        sort_dir: &str,
    ) -> Result<Page<ContactDto>> {
        let direction = SortDirection::parse_lenient(sort_dir);
        let field: SortField = sort_by.parse()?;
        let request = PageRequest::of(page, size, Sort::by(direction, field))?;
        let query = ContactQuery::new(request).with_search(search);

        tracing::debug!(
            page,
            size,
            sort_by = %field,
            sort_dir = %direction,
            search = query.filter().map(|f| f.needle()),
            "Listing contacts"
        );

        let contacts = self.store.find_all_paged_filtered(&query).await?;
        Ok(contacts.map(ContactDto::from))
    }

    /// Returns every contact, unordered.
    pub async fn get_all_contacts(&self) -> Result<Vec<ContactDto>> {
        let contacts = self.store.find_all().await?;
        Ok(contacts.into_iter().map(ContactDto::from).collect())
    }

    /// Returns the contact with `id`, or a not-found error.
    pub async fn get_contact_by_id(&self, id: ContactId) -> Result<ContactDto> {
        self.store
            .find_by_id(id)
            .await?
            .map(ContactDto::from)
            .ok_or_else(|| Error::not_found(id))
    }

    /// Persists a validated new contact and returns it with its identifier.
    pub async fn create_contact(&self, new_contact: NewContact) -> Result<ContactDto> {
        let saved = self.store.save(Contact::from(new_contact)).await?;
        tracing::info!(contact_id = ?saved.contact_id, "Created contact");
        Ok(ContactDto::from(saved))
    }

    /// Applies a partial update to the contact with `id`.
    ///
    /// Each of `name`, `email`, and `phone` is overwritten only when the
    /// request carries a non-blank value (non-empty after trimming
    /// whitespace). The read-modify-write runs as one
    /// store transaction. Fails with not-found if `id` does not exist.
    pub async fn update_contact(
        &self,
        id: ContactId,
        request: &CreateContactRequest,
    ) -> Result<ContactDto> {
        let updated = self
            .store
            .update_in_transaction(id, &|contact: &mut Contact| {
                apply_partial_update(contact, request)
            })
            .await?
            .ok_or_else(|| Error::not_found(id))?;
        tracing::info!(contact_id = %id, "Updated contact");
        Ok(ContactDto::from(updated))
    }

    /// Deletes the contact with `id`, or fails with not-found.
    ///
    /// The existence check precedes the delete so a missing id is reported
    /// rather than silently ignored.
    pub async fn delete_contact(&self, id: ContactId) -> Result<()> {
        if !self.store.exists_by_id(id).await? {
            return Err(Error::not_found(id));
        }
        self.store.delete_by_id(id).await?;
        tracing::info!(contact_id = %id, "Deleted contact");
        Ok(())
    }
}

fn apply_partial_update(contact: &mut Contact, request: &CreateContactRequest) {
    if let Some(name) = supplied(&request.name) {
        contact.name = name.to_string();
    }
    if let Some(email) = supplied(&request.email) {
        contact.email = email.to_string();
    }
    if let Some(phone) = supplied(&request.phone) {
        contact.phone = Some(phone.to_string());
    }
}

/// A field counts as supplied only when present and not blank.
///
/// Whitespace-only values count as blank, so `"   "` leaves the stored
/// value in place rather than overwriting it. The same rule rejects
/// whitespace-only `name`/`email` at creation.
fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cms_storage::MemoryContactStore;

    fn service() -> ContactService {
        ContactService::new(Arc::new(MemoryContactStore::new()))
    }

    fn new_contact(name: &str, email: &str) -> NewContact {
        CreateContactRequest::new(name, email).validate().unwrap()
    }

    #[test]
    fn test_apply_partial_update_only_supplied_fields() {
        let mut contact = Contact {
            contact_id: Some(ContactId::new(1)),
            name: "Ann Lee".to_string(),
            email: "ann@x.com".to_string(),
            phone: Some("111".to_string()),
        };
        let request = CreateContactRequest {
            name: Some("  ".to_string()),
            email: None,
            phone: Some("222".to_string()),
        };
        apply_partial_update(&mut contact, &request);
        assert_eq!(contact.name, "Ann Lee");
        assert_eq!(contact.email, "ann@x.com");
        assert_eq!(contact.phone.as_deref(), Some("222"));
    }

    #[test]
    fn test_empty_phone_does_not_clear() {
        let mut contact = Contact {
            contact_id: Some(ContactId::new(1)),
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            phone: Some("111".to_string()),
        };
        let request = CreateContactRequest {
            phone: Some(String::new()),
            ..Default::default()
        };
        apply_partial_update(&mut contact, &request);
        assert_eq!(contact.phone.as_deref(), Some("111"));
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();
        let created = service
            .create_contact(new_contact("Ann Lee", "ann@x.com"))
            .await
            .unwrap();
        assert_eq!(created.contact_id, Some(ContactId::new(1)));
        let fetched = service
            .get_contact_by_id(ContactId::new(1))
            .await
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_unknown_sort_field_is_validation_error() {
        let err = service()
            .get_contacts_paged_filtered(0, 10, None, "password", "asc")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn test_zero_size_is_validation_error() {
        let err = service()
            .get_contacts_paged_filtered(0, 0, None, "name", "asc")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn test_store_backend_name() {
        assert_eq!(service().store_backend(), "memory");
    }
}
