//! Service-level behavior of contact operations.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;

use async_trait::async_trait;
use cms_core::{Contact, ContactDto, ContactId, CreateContactRequest, Error, Page, Result};
use cms_service::ContactService;
use cms_storage::{
    ContactMutation, ContactQuery, ContactStore, MemoryContactStore, SqliteContactStore,
};
use tempfile::TempDir;

struct Harness {
    service: ContactService,
    _dir: Option<TempDir>,
}

fn memory() -> Harness {
    Harness {
        service: ContactService::new(Arc::new(MemoryContactStore::new())),
        _dir: None,
    }
}

async fn sqlite() -> Harness {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", dir.path().join("service.db").display());
    let store = SqliteContactStore::connect(&url, 2).await.unwrap();
    Harness {
        service: ContactService::new(Arc::new(store)),
        _dir: Some(dir),
    }
}

async fn harnesses() -> Vec<Harness> {
    vec![memory(), sqlite().await]
}

async fn create(service: &ContactService, name: &str, email: &str) -> ContactDto {
    let new_contact = CreateContactRequest::new(name, email).validate().unwrap();
    service.create_contact(new_contact).await.unwrap()
}

#[tokio::test]
async fn test_created_ids_are_unique_and_stable() {
    for harness in harnesses().await {
        let service = &harness.service;
        let a = create(service, "Ann", "ann@x.com").await;
        let b = create(service, "Bob", "bob@x.com").await;
        assert_ne!(a.contact_id, b.contact_id);

        let again = service.get_contact_by_id(a.contact_id.unwrap()).await.unwrap();
        assert_eq!(again.contact_id, a.contact_id);
    }
}

#[tokio::test]
async fn test_get_returns_fields_of_create_request() {
    for harness in harnesses().await {
        let service = &harness.service;
        let request = CreateContactRequest::new("Ann Lee", "ann@x.com").with_phone("555-0000");
        let created = service
            .create_contact(request.clone().validate().unwrap())
            .await
            .unwrap();

        let fetched = service
            .get_contact_by_id(created.contact_id.unwrap())
            .await
            .unwrap();
        assert_eq!(Some(fetched.name), request.name);
        assert_eq!(Some(fetched.email), request.email);
        assert_eq!(fetched.phone, request.phone);
    }
}

#[tokio::test]
async fn test_get_unknown_id_is_not_found() {
    for harness in harnesses().await {
        let err = harness
            .service
            .get_contact_by_id(ContactId::new(77))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Contact not found with ID: 77");
    }
}

#[tokio::test]
async fn test_documented_create_then_phone_update() {
    for harness in harnesses().await {
        let service = &harness.service;
        let created = create(service, "Ann Lee", "ann@x.com").await;
        assert_eq!(
            serde_json::to_value(&created).unwrap(),
            serde_json::json!({
                "contactId": 1,
                "name": "Ann Lee",
                "email": "ann@x.com",
                "phone": null,
            })
        );

        let request = CreateContactRequest {
            phone: Some("555-1212".to_string()),
            ..Default::default()
        };
        let updated = service
            .update_contact(ContactId::new(1), &request)
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_value(&updated).unwrap(),
            serde_json::json!({
                "contactId": 1,
                "name": "Ann Lee",
                "email": "ann@x.com",
                "phone": "555-1212",
            })
        );
    }
}

#[tokio::test]
async fn test_update_with_blank_name_keeps_name() {
    for harness in harnesses().await {
        let service = &harness.service;
        let created = create(service, "Ann Lee", "ann@x.com").await;
        let id = created.contact_id.unwrap();

        let request = CreateContactRequest {
            name: Some(String::new()),
            email: Some("new@x.com".to_string()),
            phone: None,
        };
        let updated = service.update_contact(id, &request).await.unwrap();
        assert_eq!(updated.name, "Ann Lee");
        assert_eq!(updated.email, "new@x.com");
        assert_eq!(service.get_contact_by_id(id).await.unwrap(), updated);
    }
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    for harness in harnesses().await {
        let err = harness
            .service
            .update_contact(ContactId::new(5), &CreateContactRequest::new("A", "a@x.com"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}

#[tokio::test]
async fn test_delete_is_not_silently_idempotent() {
    for harness in harnesses().await {
        let service = &harness.service;
        let created = create(service, "Ann", "ann@x.com").await;
        let id = created.contact_id.unwrap();

        service.delete_contact(id).await.unwrap();
        assert!(service.get_contact_by_id(id).await.unwrap_err().is_not_found());
        assert!(service.delete_contact(id).await.unwrap_err().is_not_found());
    }
}

#[tokio::test]
async fn test_paged_listing_over_five_records() {
    for harness in harnesses().await {
        let service = &harness.service;
        for name in ["Eve", "Dan", "Carol", "Bob", "Ann"] {
            create(service, name, &format!("{}@x.com", name.to_lowercase())).await;
        }

        let mut names = Vec::new();
        for (page, expected) in [(0, 2), (1, 2), (2, 1)] {
            let result = service
                .get_contacts_paged_filtered(page, 2, None, "name", "asc")
                .await
                .unwrap();
            assert_eq!(result.content.len(), expected);
            assert_eq!(result.total_elements, 5);
            names.extend(result.content.into_iter().map(|c| c.name));
        }
        assert_eq!(names, vec!["Ann", "Bob", "Carol", "Dan", "Eve"]);

        let desc = service
            .get_contacts_paged_filtered(0, 2, None, "name", "DESC")
            .await
            .unwrap();
        let desc_names: Vec<_> = desc.content.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(desc_names, vec!["Eve", "Dan"]);

        let garbage = service
            .get_contacts_paged_filtered(0, 1, None, "name", "upside-down")
            .await
            .unwrap();
        assert_eq!(garbage.content[0].name, "Ann");
    }
}

#[tokio::test]
async fn test_search_without_match_returns_empty_page() {
    for harness in harnesses().await {
        let service = &harness.service;
        create(service, "Ann Lee", "ann@x.com").await;
        let result = service
            .get_contacts_paged_filtered(0, 10, Some("nobody"), "name", "asc")
            .await
            .unwrap();
        assert!(result.content.is_empty());
        assert_eq!(result.total_elements, 0);

        let blank = service
            .get_contacts_paged_filtered(0, 10, Some("  "), "name", "asc")
            .await
            .unwrap();
        assert_eq!(blank.total_elements, 1);
    }
}

#[tokio::test]
async fn test_get_all_contacts() {
    for harness in harnesses().await {
        let service = &harness.service;
        assert!(service.get_all_contacts().await.unwrap().is_empty());
        create(service, "Ann", "ann@x.com").await;
        create(service, "Bob", "bob@x.com").await;
        let mut names: Vec<_> = service
            .get_all_contacts()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Ann", "Bob"]);
    }
}

/// Store whose every operation fails, to check that failures propagate.
struct FailingStore;

fn unavailable() -> Error {
    Error::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl ContactStore for FailingStore {
    async fn find_by_id(&self, _id: ContactId) -> Result<Option<Contact>> {
        Err(unavailable())
    }

    async fn exists_by_id(&self, _id: ContactId) -> Result<bool> {
        Err(unavailable())
    }

    async fn save(&self, _contact: Contact) -> Result<Contact> {
        Err(unavailable())
    }

    async fn delete_by_id(&self, _id: ContactId) -> Result<()> {
        Err(unavailable())
    }

    async fn find_all(&self) -> Result<Vec<Contact>> {
        Err(unavailable())
    }

    async fn find_all_paged_filtered(&self, _query: &ContactQuery) -> Result<Page<Contact>> {
        Err(unavailable())
    }

    async fn update_in_transaction(
        &self,
        _id: ContactId,
        _mutation: ContactMutation<'_>,
    ) -> Result<Option<Contact>> {
        Err(unavailable())
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

#[tokio::test]
async fn test_store_failures_propagate_as_server_errors() {
    let service = ContactService::new(Arc::new(FailingStore));
    let id = ContactId::new(1);

    let errors = vec![
        service.get_contact_by_id(id).await.unwrap_err(),
        service.delete_contact(id).await.unwrap_err(),
        service
            .update_contact(id, &CreateContactRequest::default())
            .await
            .unwrap_err(),
        service.get_all_contacts().await.unwrap_err(),
        service
            .get_contacts_paged_filtered(0, 10, None, "name", "asc")
            .await
            .unwrap_err(),
    ];
    for err in errors {
        assert!(matches!(err, Error::Database(_)), "unexpected error: {err}");
        assert!(!err.is_client_error());
    }
}
