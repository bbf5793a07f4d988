use super::{validate_key, KeyValueStore, StoreError, StoreResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-process store, optionally bounded to emulate browser storage quotas.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RefCell<BTreeMap<String, String>>,
    max_entries: Option<usize>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects inserts of new keys once `max_entries` keys are stored.
    pub fn with_quota(max_entries: usize) -> Self {
        Self {
            entries: RefCell::new(BTreeMap::new()),
            max_entries: Some(max_entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let key = validate_key(key)?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let key = validate_key(key)?;
        let mut entries = self.entries.borrow_mut();
        if let Some(limit) = self.max_entries {
            if !entries.contains_key(key) && entries.len() >= limit {
                return Err(StoreError::QuotaExceeded { limit });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let key = validate_key(key)?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.entries.borrow_mut().clear();
        Ok(())
    }
}
