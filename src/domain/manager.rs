use super::*;

use crate::config::Config;
use crate::storage::{PersistenceAdapter, parse_storage};
use super::contact::{Contact, ContactId, PhoneRule, validate_contact};
use super::id::IdAllocator;
use tracing::{debug, info};

/// The authoritative, ordered list of contacts.
///
/// Every successful mutation writes the whole collection through the
/// [`PersistenceAdapter`] before returning. When that write fails the
/// mutation stays applied in memory and the persistence error is returned.
pub struct ContactStore {
    contacts: Vec<Contact>,
    ids: IdAllocator,
    phone_rule: PhoneRule,
    persistence: PersistenceAdapter,
}

impl ContactStore {
    /// Loads (or seeds) the collection through `persistence`.
    pub fn open(persistence: PersistenceAdapter, phone_rule: PhoneRule) -> Result<Self, AppError> {
        let contacts = persistence.load()?;
        let ids = IdAllocator::seeded(persistence.id_policy(), contacts.iter().map(|c| &c.id));

        info!(
            count = contacts.len(),
            medium = persistence.get_medium(),
            "contact store opened"
        );

        Ok(Self {
            contacts,
            ids,
            phone_rule,
            persistence,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let persistence = PersistenceAdapter::new(parse_storage(config), config.id_policy);
        Self::open(persistence, config.phone_rule)
    }

    /// Releases the store, handing back the final collection.
    pub fn dispose(self) -> Vec<Contact> {
        debug!(count = self.contacts.len(), "contact store disposed");
        self.contacts
    }

    pub fn list(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id == id)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn add(&mut self, name: &str, phone: &str) -> Result<Contact, AppError> {
        validate_contact(name, phone, self.phone_rule)?;

        let contacts = &self.contacts;
        let id = self
            .ids
            .allocate(|candidate| contacts.iter().any(|c| &c.id == candidate));

        let contact = Contact::new(id, name, phone);
        self.contacts.push(contact.clone());
        info!(%id, "contact added");

        self.persist()?;
        Ok(contact)
    }

    pub fn update(&mut self, id: &ContactId, name: &str, phone: &str) -> Result<Contact, AppError> {
        let index = self.index_of(id)?;
        validate_contact(name, phone, self.phone_rule)?;

        let contact = &mut self.contacts[index];
        contact.name = name.to_string();
        contact.phone = phone.to_string();
        let updated = contact.clone();
        info!(%id, "contact updated");

        self.persist()?;
        Ok(updated)
    }

    pub fn remove(&mut self, id: &ContactId) -> Result<(), AppError> {
        let index = self.index_of(id)?;

        self.contacts.remove(index);
        info!(%id, "contact removed");

        self.persist()
    }

    fn index_of(&self, id: &ContactId) -> Result<usize, AppError> {
        self.contacts
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| AppError::NotFound("Contact".to_string()))
    }

    fn persist(&self) -> Result<(), AppError> {
        self.persistence.save(&self.contacts)
    }
}
