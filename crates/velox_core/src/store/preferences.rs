//! Error-swallowing facade over a [`KeyValueStore`].
//!
//! Managers read their persisted slice at construction and write on change;
//! a storage failure must never abort those flows, so every method here
//! logs and returns a default or a `false` success flag instead.

use super::{KeyValueStore, StoreError};
use log::{error, warn};

pub struct Preferences {
    store: Box<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                log_failure("get", key, &err);
                None
            }
        }
    }

    pub fn set_string(&self, key: &str, value: &str) -> bool {
        match self.store.set(key, value) {
            Ok(()) => true,
            Err(err) => {
                log_failure("set", key, &err);
                false
            }
        }
    }

    pub fn remove(&self, key: &str) -> bool {
        match self.store.remove(key) {
            Ok(()) => true,
            Err(err) => {
                log_failure("remove", key, &err);
                false
            }
        }
    }

    pub fn clear(&self) -> bool {
        match self.store.clear() {
            Ok(()) => true,
            Err(err) => {
                log_failure("clear", "*", &err);
                false
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get_string(key).is_some()
    }

    /// Reads `"true"`/`"false"`; any other stored value counts as absent.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get_string(key)?.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            other => {
                warn!(
                    "event=storage_decode module=store status=error key={} value_len={}",
                    key,
                    other.len()
                );
                None
            }
        }
    }

    pub fn set_bool(&self, key: &str, value: bool) -> bool {
        self.set_string(key, if value { "true" } else { "false" })
    }
}

fn log_failure(op: &str, key: &str, err: &StoreError) {
    error!(
        "event=storage_access module=store status=error op={} key={} error={}",
        op, key, err
    );
}

#[cfg(test)]
mod tests {
    use super::Preferences;
    use crate::store::MemoryKvStore;

    #[test]
    fn failures_return_defaults_instead_of_errors() {
        let prefs = Preferences::new(MemoryKvStore::with_quota(0));
        assert!(!prefs.set_string("theme-preference", "dark"));
        assert_eq!(prefs.get_string("theme-preference"), None);
        assert_eq!(prefs.get_string(""), None);
        assert!(!prefs.remove(" "));
    }

    #[test]
    fn bool_helpers_decode_or_fall_back() {
        let prefs = Preferences::new(MemoryKvStore::new());
        assert!(prefs.set_bool("sidebar-collapsed", true));
        assert_eq!(prefs.get_bool("sidebar-collapsed"), Some(true));

        prefs.set_string("sidebar-collapsed", "maybe");
        assert_eq!(prefs.get_bool("sidebar-collapsed"), None);
    }
}
