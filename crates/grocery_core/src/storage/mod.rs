//! Persistent text slots keyed by name.
//!
//! # Responsibility
//! - Define the key-value contract the item store persists through.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - `set` replaces the whole value stored under a key.
//! - `get` on a key never written returns `Ok(None)`, not an error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type KvResult<T> = Result<T, KvError>;

/// Key-value backend failure.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Connection schema is older than this build expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    /// Backend refused the write (quota, read-only medium, injected failure).
    Rejected(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind required {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::Rejected(reason) => write!(f, "write rejected: {reason}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// A local store of text values under string keys.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> KvResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        (**self).set(key, value)
    }
}
