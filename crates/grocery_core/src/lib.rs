//! Core domain logic for the grocery list.
//! This crate owns the item store, its persistence and its view queries;
//! rendering stays with the caller.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod storage;
pub mod store;

pub use config::{open_store, OpenStoreError, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::item::{Item, ItemId, ItemValidationError};
pub use query::filter::{filter_options, resolve_filter, CategoryFilter, ALL_CATEGORIES};
pub use query::sort::{compare_names, sorted, SortCriterion};
pub use storage::{KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore};
pub use store::{ItemStore, PersistenceError, DEFAULT_STORAGE_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
