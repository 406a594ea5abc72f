//! Store location configuration.
//!
//! # Responsibility
//! - Resolve where the slot database lives and which key holds the list.
//! - Wire the SQLite backend into a loaded `ItemStore`.
//!
//! # Invariants
//! - `data_dir` is absolute; relative paths are rejected at open time.

use crate::storage::{KvError, SqliteKeyValueStore};
use crate::store::{ItemStore, DEFAULT_STORAGE_KEY};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// File name of the slot database inside the data directory.
pub const DB_FILE_NAME: &str = "grocery_list.sqlite3";

/// Where and under which key the grocery list is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

/// Failure opening the configured store.
#[derive(Debug)]
pub enum OpenStoreError {
    RelativeDataDir(PathBuf),
    Backend(KvError),
}

impl Display for OpenStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RelativeDataDir(path) => write!(
                f,
                "data_dir must be an absolute path, got `{}`",
                path.display()
            ),
            Self::Backend(err) => write!(f, "{err}"),
        }
    }
}

impl Error for OpenStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RelativeDataDir(_) => None,
            Self::Backend(err) => Some(err),
        }
    }
}

impl From<KvError> for OpenStoreError {
    fn from(value: KvError) -> Self {
        Self::Backend(value)
    }
}

/// Opens the SQLite backend described by `config` and loads the store.
///
/// Only backend setup can fail; slot content problems are recovered by
/// `ItemStore::load_with_key`.
pub fn open_store(config: &StoreConfig) -> Result<ItemStore<SqliteKeyValueStore>, OpenStoreError> {
    if !config.data_dir.is_absolute() {
        return Err(OpenStoreError::RelativeDataDir(config.data_dir.clone()));
    }
    let backend = SqliteKeyValueStore::open(config.db_path())?;
    Ok(ItemStore::load_with_key(backend, config.storage_key.as_str()))
}
