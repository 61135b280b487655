use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::*;
use crate::domain::contact::{Contact, ContactId};
use crate::domain::id::{IdAllocator, IdPolicy};

/// The single slot holding the whole serialized collection.
pub const STORAGE_KEY: &str = "contacts";

pub const SEED_NAME: &str = "SlothWerks";
pub const SEED_PHONE: &str = "6162586179";

/// Mirrors the contact collection into one key of a [`KeyValueStorage`].
pub struct PersistenceAdapter {
    storage: Box<dyn KeyValueStorage>,
    id_policy: IdPolicy,
}

/// A stored record before validation. Every field is optional so one bad
/// record does not make the whole array unreadable.
#[derive(Debug, Deserialize)]
struct RawContact {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    phone: Option<Value>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub dropped: usize,
    pub repaired: usize,
}

impl DecodeReport {
    pub fn is_clean(&self) -> bool {
        self.dropped == 0 && self.repaired == 0
    }
}

impl PersistenceAdapter {
    pub fn new(storage: Box<dyn KeyValueStorage>, id_policy: IdPolicy) -> Self {
        Self { storage, id_policy }
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }

    pub fn get_medium(&self) -> &str {
        self.storage.get_medium()
    }

    /// Reads the stored collection, seeding (and saving) the default contact
    /// when nothing usable is stored. Stored records are validated: bad
    /// records are dropped, missing or duplicate ids are reassigned, and a
    /// repaired collection is written back.
    pub fn load(&self) -> Result<Vec<Contact>, AppError> {
        let Some(data) = self.storage.get(STORAGE_KEY)? else {
            info!("no contacts found in storage, seeding");
            return self.seed();
        };

        let value: Value = match serde_json::from_str(&data) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "stored contacts are not valid JSON, seeding");
                return self.seed();
            }
        };

        let Value::Array(records) = value else {
            warn!("stored contacts are not a JSON array, seeding");
            return self.seed();
        };

        let (contacts, report) = decode_contacts(records, self.id_policy);
        debug!(count = contacts.len(), medium = self.get_medium(), "loaded contacts");

        if !report.is_clean() {
            warn!(
                dropped = report.dropped,
                repaired = report.repaired,
                "stored contacts needed repair, saving cleaned collection"
            );
            self.save(&contacts)?;
        }

        Ok(contacts)
    }

    pub fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        let data = serde_json::to_string(contacts).map_err(PersistenceError::from)?;
        self.storage.set(STORAGE_KEY, &data)?;

        debug!(count = contacts.len(), bytes = data.len(), "saved contacts");
        Ok(())
    }

    /// Forgets the stored collection; the next `load` seeds again.
    pub fn clear(&self) -> Result<(), AppError> {
        self.storage.remove(STORAGE_KEY)?;
        info!("cleared stored contacts");
        Ok(())
    }

    fn seed(&self) -> Result<Vec<Contact>, AppError> {
        let id = IdAllocator::new(self.id_policy).allocate(|_| false);
        let seeded = vec![Contact::new(id, SEED_NAME, SEED_PHONE)];

        self.save(&seeded)?;
        Ok(seeded)
    }
}

/// Validates stored records, keeping their order.
pub fn decode_contacts(records: Vec<Value>, policy: IdPolicy) -> (Vec<Contact>, DecodeReport) {
    let mut report = DecodeReport::default();
    let mut seen: HashSet<ContactId> = HashSet::new();
    let mut pending: Vec<(Option<ContactId>, String, String)> = Vec::with_capacity(records.len());

    for record in records {
        let Ok(raw) = serde_json::from_value::<RawContact>(record) else {
            report.dropped += 1;
            continue;
        };

        let (Some(name), Some(phone)) = (non_empty_text(raw.name), non_empty_text(raw.phone)) else {
            report.dropped += 1;
            continue;
        };

        let id = raw.id.as_ref().and_then(parse_id).filter(|id| seen.insert(*id));
        if id.is_none() {
            report.repaired += 1;
        }

        pending.push((id, name, phone));
    }

    let mut ids = IdAllocator::seeded(policy, &seen);

    let contacts = pending
        .into_iter()
        .map(|(id, name, phone)| {
            let id = id.unwrap_or_else(|| {
                let fresh = ids.allocate(|candidate| seen.contains(candidate));
                seen.insert(fresh);
                fresh
            });
            Contact { id, name, phone }
        })
        .collect();

    (contacts, report)
}

fn parse_id(value: &Value) -> Option<ContactId> {
    match value {
        Value::Number(n) => n.as_u64().map(ContactId::Seq),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn non_empty_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemStorage;
    use serde_json::json;

    fn adapter(storage: &MemStorage) -> PersistenceAdapter {
        PersistenceAdapter::new(Box::new(storage.clone()), IdPolicy::Sequential)
    }

    #[test]
    fn empty_storage_is_seeded_once() -> Result<(), AppError> {
        let storage = MemStorage::new();
        let persistence = adapter(&storage);

        let first = persistence.load()?;
        let second = persistence.load()?;

        assert_eq!(first, vec![Contact::new(ContactId::Seq(0), SEED_NAME, SEED_PHONE)]);
        assert_eq!(first, second);
        assert_eq!(storage.write_count(), 1);
        Ok(())
    }

    #[test]
    fn empty_array_is_not_reseeded() -> Result<(), AppError> {
        let storage = MemStorage::new();
        storage.set(STORAGE_KEY, "[]")?;

        assert!(adapter(&storage).load()?.is_empty());
        assert_eq!(storage.write_count(), 1);
        Ok(())
    }

    #[test]
    fn unparseable_data_is_replaced_by_seed() -> Result<(), AppError> {
        for garbage in ["{not json", "null", r#"{"id":1}"#, "42"] {
            let storage = MemStorage::new();
            storage.set(STORAGE_KEY, garbage)?;

            let contacts = adapter(&storage).load()?;

            assert_eq!(contacts.len(), 1, "input: {garbage}");
            assert_eq!(contacts[0].name, SEED_NAME);
            assert!(storage.get(STORAGE_KEY)?.is_some_and(|s| s.contains(SEED_NAME)));
        }
        Ok(())
    }

    #[test]
    fn malformed_records_are_dropped_and_ids_repaired() {
        let records = vec![
            json!({"id": 4, "name": "Ada", "phone": "5550000001"}),
            json!({"name": "NoId", "phone": "5550000002"}),
            json!({"id": 4, "name": "Dup", "phone": "5550000003"}),
            json!({"id": 2, "name": "", "phone": "5550000004"}),
            json!({"id": 5, "name": 17, "phone": "5550000005"}),
            json!("not an object"),
            json!({"id": "9", "name": "Legacy", "phone": "call me"}),
        ];

        let (contacts, report) = decode_contacts(records, IdPolicy::Sequential);

        assert_eq!(report, DecodeReport { dropped: 3, repaired: 2 });
        let ids: Vec<ContactId> = contacts.iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            vec![
                ContactId::Seq(4),
                ContactId::Seq(10),
                ContactId::Seq(11),
                ContactId::Seq(9)
            ]
        );
        assert_eq!(contacts[3].phone, "call me");
    }

    #[test]
    fn repaired_collection_is_written_back() -> Result<(), AppError> {
        let storage = MemStorage::new();
        storage.set(
            STORAGE_KEY,
            r#"[{"name":"Jane","phone":"5551234567"},{"name":"John","phone":"5557654321"}]"#,
        )?;

        let contacts = adapter(&storage).load()?;
        assert_eq!(storage.write_count(), 2);

        let again = adapter(&storage).load()?;
        assert_eq!(contacts, again);
        assert_eq!(storage.write_count(), 2);
        Ok(())
    }

    #[test]
    fn uuid_ids_survive_a_round_trip() -> Result<(), AppError> {
        let storage = MemStorage::new();
        let persistence = PersistenceAdapter::new(Box::new(storage.clone()), IdPolicy::Random);

        let seeded = persistence.load()?;
        assert!(matches!(seeded[0].id, ContactId::Uuid(_)));

        persistence.save(&seeded)?;
        assert_eq!(persistence.load()?, seeded);
        Ok(())
    }

    #[test]
    fn save_surfaces_storage_failures() -> Result<(), AppError> {
        let storage = MemStorage::new();
        storage.set_disabled(true)?;

        let err = adapter(&storage).save(&[]).unwrap_err();
        assert!(err.is_persistence());

        let err = adapter(&storage).load().unwrap_err();
        assert!(err.is_persistence());
        Ok(())
    }

    #[test]
    fn clear_makes_next_load_seed() -> Result<(), AppError> {
        let storage = MemStorage::new();
        let persistence = adapter(&storage);

        persistence.save(&[Contact::new(ContactId::Seq(3), "Jane", "5551234567")])?;
        persistence.clear()?;

        assert_eq!(persistence.load()?[0].name, SEED_NAME);
        Ok(())
    }
}
