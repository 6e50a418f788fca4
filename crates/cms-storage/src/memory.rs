//! In-memory contact store.
//!
//! Contacts live in an ordered map behind a [`tokio::sync::RwLock`].
//! Identifiers come from a monotonically increasing counter and are never
//! reused, matching the SQLite backend's `AUTOINCREMENT` behavior.

use std::collections::BTreeMap;

use async_trait::async_trait;
use cms_core::{Contact, ContactId, Page, Result};
use tokio::sync::RwLock;

use crate::query::ContactQuery;
use crate::traits::{ContactMutation, ContactStore};

#[derive(Debug)]
struct MemoryState {
    contacts: BTreeMap<ContactId, Contact>,
    last_id: i64,
}

impl MemoryState {
    fn save(&mut self, mut contact: Contact) -> Contact {
        let id = match contact.contact_id {
            Some(id) => {
                self.last_id = self.last_id.max(id.get());
                id
            }
            None => {
                self.last_id += 1;
                ContactId::new(self.last_id)
            }
        };
        contact.contact_id = Some(id);
        self.contacts.insert(id, contact.clone());
        contact
    }
}

/// Contact store held entirely in process memory.
#[derive(Debug)]
pub struct MemoryContactStore {
    state: RwLock<MemoryState>,
}

impl MemoryContactStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                contacts: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl Default for MemoryContactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
        Ok(self.state.read().await.contacts.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: ContactId) -> Result<bool> {
        Ok(self.state.read().await.contacts.contains_key(&id))
    }

    async fn save(&self, contact: Contact) -> Result<Contact> {
        let saved = self.state.write().await.save(contact);
        tracing::debug!(contact_id = ?saved.contact_id, "Saved contact in memory");
        Ok(saved)
    }

    async fn delete_by_id(&self, id: ContactId) -> Result<()> {
        self.state.write().await.contacts.remove(&id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Contact>> {
        Ok(self.state.read().await.contacts.values().cloned().collect())
    }

    async fn find_all_paged_filtered(&self, query: &ContactQuery) -> Result<Page<Contact>> {
        let state = self.state.read().await;
        let mut matching: Vec<&Contact> = state
            .contacts
            .values()
            .filter(|contact| query.matches(contact))
            .collect();
        matching.sort_by(|a, b| query.compare(a, b));

        let total = matching.len() as u64;
        let offset = usize::try_from(query.page_request().offset()).unwrap_or(usize::MAX);
        let content = matching
            .into_iter()
            .skip(offset)
            .take(query.page_request().size() as usize)
            .cloned()
            .collect();

        Ok(Page::new(content, query.page_request(), total))
    }

    async fn update_in_transaction(
        &self,
        id: ContactId,
        mutation: ContactMutation<'_>,
    ) -> Result<Option<Contact>> {
        // Held across the whole read-modify-write.
        let mut state = self.state.write().await;
        let Some(mut contact) = state.contacts.get(&id).cloned() else {
            return Ok(None);
        };
        mutation(&mut contact);
        contact.contact_id = Some(id);
        Ok(Some(state.save(contact)))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
