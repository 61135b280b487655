use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::*;

/// Process-local key/value storage.
///
/// Clones share the same slots, so a caller can keep a handle after giving
/// one to a [`PersistenceAdapter`] and inspect what was written. A byte
/// quota and a disabled state reproduce the two ways browser storage
/// refuses writes.
#[derive(Debug, Clone, Default)]
pub struct MemStorage {
    inner: Arc<Mutex<MemInner>>,
}

#[derive(Debug, Default)]
struct MemInner {
    data: HashMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
    writes: usize,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes of keys plus values this storage accepts.
    pub fn with_quota(limit: usize) -> Self {
        let storage = Self::new();
        if let Ok(mut inner) = storage.inner.lock() {
            inner.quota = Some(limit);
        }
        storage
    }

    pub fn set_disabled(&self, disabled: bool) -> Result<(), PersistenceError> {
        self.lock()?.disabled = disabled;
        Ok(())
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.inner.lock().map(|inner| inner.writes).unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemInner>, PersistenceError> {
        self.inner
            .lock()
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))
    }

    fn lock_enabled(&self) -> Result<MutexGuard<'_, MemInner>, PersistenceError> {
        let inner = self.lock()?;
        if inner.disabled {
            return Err(PersistenceError::Unavailable(
                "memory storage is disabled".to_string(),
            ));
        }
        Ok(inner)
    }
}

impl KeyValueStorage for MemStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.lock_enabled()?.data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut inner = self.lock_enabled()?;

        if let Some(limit) = inner.quota {
            let others: usize = inner
                .data
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();

            if needed > limit {
                return Err(PersistenceError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        inner.data.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.lock_enabled()?.data.remove(key);
        Ok(())
    }

    fn get_medium(&self) -> &str {
        "mem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_slots() -> Result<(), PersistenceError> {
        let storage = MemStorage::new();
        let handle = storage.clone();

        storage.set("contacts", "[]")?;

        assert_eq!(handle.get("contacts")?, Some("[]".to_string()));
        assert_eq!(handle.write_count(), 1);

        handle.remove("contacts")?;
        handle.remove("contacts")?;
        assert_eq!(storage.get("contacts")?, None);
        Ok(())
    }

    #[test]
    fn quota_rejects_oversized_writes() -> Result<(), PersistenceError> {
        let storage = MemStorage::with_quota(16);

        storage.set("contacts", "[1,2]")?;
        let err = storage.set("contacts", "[1,2,3,4,5,6,7,8]").unwrap_err();

        assert!(matches!(err, PersistenceError::QuotaExceeded { limit: 16, .. }));
        assert_eq!(storage.get("contacts")?, Some("[1,2]".to_string()));
        Ok(())
    }

    #[test]
    fn disabled_storage_fails_every_call() -> Result<(), PersistenceError> {
        let storage = MemStorage::new();
        storage.set_disabled(true)?;

        assert!(matches!(storage.get("contacts"), Err(PersistenceError::Unavailable(_))));
        assert!(storage.set("contacts", "[]").is_err());
        assert_eq!(storage.write_count(), 0);

        storage.set_disabled(false)?;
        assert!(storage.set("contacts", "[]").is_ok());
        Ok(())
    }
}
