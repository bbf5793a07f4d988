//! Persisted key-value preferences.
//!
//! # Responsibility
//! - Define the raw string key-value contract (`KeyValueStore`).
//! - Provide in-memory and SQLite implementations.
//! - Wrap stores in [`Preferences`], which never surfaces errors to callers.
//!
//! # Invariants
//! - Values are opaque strings; there is no schema versioning per key.
//! - Every failed operation is logged once with `status=error`.

mod memory;
mod preferences;
mod sqlite;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use memory::MemoryKvStore;
pub use preferences::Preferences;
pub use sqlite::SqliteKvStore;

/// Persisted theme choice, `light|dark`.
pub const THEME_PREFERENCE_KEY: &str = "theme-preference";
/// Persisted sidebar state, `true|false`.
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebar-collapsed";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    InvalidKey(String),
    /// Write rejected because the store is full.
    QuotaExceeded { limit: usize },
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey(key) => write!(f, "invalid storage key `{key}`"),
            Self::QuotaExceeded { limit } => {
                write!(f, "storage quota of {limit} entries exceeded")
            }
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Synchronous string key-value storage.
///
/// One call is one storage operation; there are no multi-key transactions.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
    fn clear(&self) -> StoreResult<()>;
}

pub(crate) fn validate_key(key: &str) -> StoreResult<&str> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(trimmed)
}
