//! Contact storage.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use contacts_core::error::{ContactsError, Result};

use super::model::Contact;

/// Keyed CRUD store. Every id-based operation reports `NotFound` for unknown ids.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Contact>>;
    async fn get(&self, id: u64) -> Result<Contact>;
    /// Assigns a fresh id and returns the stored record.
    async fn add(&self, contact: Contact) -> Result<Contact>;
    /// Overwrites every field of the record with `contact.contact_id`.
    async fn update(&self, contact: Contact) -> Result<()>;
    async fn delete(&self, id: u64) -> Result<()>;
}

pub struct InMemoryContactStore {
    contacts: DashMap<u64, Contact>,
    next_id: AtomicU64,
}

impl Default for InMemoryContactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self {
            contacts: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn with_contacts<I: IntoIterator<Item = Contact>>(contacts: I) -> Self {
        let store = Self::new();
        let mut max_id: u64 = 0;
        for c in contacts {
            max_id = max_id.max(c.contact_id);
            store.contacts.insert(c.contact_id, c);
        }
        store.next_id.store(max_id + 1, Ordering::Relaxed);
        store
    }

    /// Store pre-filled with the demo contacts (ids 1-5).
    pub fn seeded() -> Self {
        Self::with_contacts([
            Contact::new(1, "Filip W", "Bahnhofstrasse 1", "Zurich"),
            Contact::new(2, "Josh Donaldson", "1 Blue Jays Way", "Toronto"),
            Contact::new(3, "Aaron Sanchez", "1 Blue Jays Way", "Toronto"),
            Contact::new(4, "Jose Bautista", "1 Blue Jays Way", "Toronto"),
            Contact::new(5, "Edwin Encarnacion", "1 Blue Jays Way", "Toronto"),
        ])
    }

    fn not_found(id: u64) -> ContactsError {
        tracing::debug!(id, "contact not found");
        ContactsError::NotFound(format!("contact {id}"))
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn get_all(&self) -> Result<Vec<Contact>> {
        let mut all: Vec<Contact> = self.contacts.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|c| c.contact_id);
        Ok(all)
    }

    async fn get(&self, id: u64) -> Result<Contact> {
        self.contacts
            .get(&id)
            .map(|e| e.value().clone())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn add(&self, mut contact: Contact) -> Result<Contact> {
        contact.contact_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.contacts.insert(contact.contact_id, contact.clone());
        Ok(contact)
    }

    async fn update(&self, contact: Contact) -> Result<()> {
        let id = contact.contact_id;
        let mut entry = self.contacts.get_mut(&id).ok_or_else(|| Self::not_found(id))?;
        *entry = contact;
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<()> {
        self.contacts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }
}
