use super::id::IdAllocator;
use crate::model::item::{check_fields, Item, ItemId, ItemValidationError};
use crate::query::filter::{filter_options, CategoryFilter};
use crate::query::sort::{sorted, SortCriterion};
use crate::storage::{KeyValueStore, KvError};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Slot key the item sequence is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "groceryItems";

/// Failure reading or writing the persisted item slot.
///
/// Never returned from mutations: the store logs it, keeps running on its
/// in-memory state and exposes it through `last_persistence_error`.
#[derive(Debug)]
pub enum PersistenceError {
    /// Backend failed to read the slot.
    Read(KvError),
    /// Slot content is not a JSON array of valid items.
    Decode(serde_json::Error),
    /// Slot decoded but two items share an id.
    Invalid(String),
    Encode(serde_json::Error),
    /// Backend failed to store the slot.
    Write(KvError),
}

impl PersistenceError {
    /// Returns whether this error came from the load path.
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Read(_) | Self::Decode(_) | Self::Invalid(_))
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Read(_) => "slot_read_failed",
            Self::Decode(_) => "slot_decode_failed",
            Self::Invalid(_) => "slot_invalid",
            Self::Encode(_) => "slot_encode_failed",
            Self::Write(_) => "slot_write_failed",
        }
    }
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read persisted items: {err}"),
            Self::Decode(err) => write!(f, "persisted items are malformed: {err}"),
            Self::Invalid(details) => write!(f, "persisted items are invalid: {details}"),
            Self::Encode(err) => write!(f, "failed to encode items: {err}"),
            Self::Write(err) => write!(f, "failed to persist items: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) | Self::Write(err) => Some(err),
            Self::Decode(err) | Self::Encode(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

/// Insertion-ordered grocery list mirrored to a key-value slot.
///
/// Every operation is synchronous; writes happen inside `add`/`remove`
/// before they return.
pub struct ItemStore<S: KeyValueStore> {
    backend: S,
    storage_key: String,
    items: Vec<Item>,
    ids: IdAllocator,
    last_error: Option<PersistenceError>,
}

impl<S: KeyValueStore> ItemStore<S> {
    /// Loads the store from the default slot.
    ///
    /// Never fails: missing data yields an empty store, and unreadable or
    /// invalid data yields an empty store plus a retained read error.
    pub fn load(backend: S) -> Self {
        Self::load_with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Loads the store from a caller-chosen slot key.
    pub fn load_with_key(backend: S, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let started_at = Instant::now();

        let (items, last_error) = match read_items(&backend, &storage_key) {
            Ok(items) => {
                info!(
                    "event=store_load module=store status=ok count={} duration_ms={}",
                    items.len(),
                    started_at.elapsed().as_millis()
                );
                (items, None)
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=recovered fallback=empty error_code={} error={}",
                    err.code(),
                    err
                );
                (Vec::new(), Some(err))
            }
        };

        let ids = IdAllocator::after(items.iter().map(Item::id).max());
        Self {
            backend,
            storage_key,
            items,
            ids,
            last_error,
        }
    }

    /// Adds an item to the end of the list and persists the list.
    ///
    /// Both inputs are trimmed before validation and storage.
    ///
    /// # Errors
    /// - `ItemValidationError` when either input is blank; nothing changes.
    pub fn add(&mut self, name: &str, category: &str) -> Result<Item, ItemValidationError> {
        let name = name.trim();
        let category = category.trim();
        if let Err(err) = check_fields(name, category) {
            warn!("event=item_add module=store status=rejected reason={err}");
            return Err(err);
        }

        let now = Utc::now();
        let created_at = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);
        let items = &self.items;
        let id = self.ids.next(created_at.timestamp_millis(), |id| {
            items.iter().any(|item| item.id() == id)
        });
        let item = Item::new(id, name, category, created_at)?;

        self.items.push(item.clone());
        self.persist();
        info!(
            "event=item_add module=store status=ok id={} count={}",
            id,
            self.items.len()
        );
        Ok(item)
    }

    /// Removes the item with `id` and persists the list.
    ///
    /// Returns the removed item, or `None` (without writing) when no item
    /// has that id.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let Some(index) = self.items.iter().position(|item| item.id() == id) else {
            debug!("event=item_remove module=store status=miss id={id}");
            return None;
        };

        let removed = self.items.remove(index);
        self.persist();
        info!(
            "event=item_remove module=store status=ok id={} count={}",
            id,
            self.items.len()
        );
        Some(removed)
    }

    /// Returns the items matching `filter` in stored order.
    pub fn list(&self, filter: &CategoryFilter) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect()
    }

    /// Returns a reordered copy of `items`; neither `items` nor the store
    /// is modified.
    pub fn sorted(&self, items: &[Item], criterion: SortCriterion) -> Vec<Item> {
        sorted(items, criterion)
    }

    /// Returns the filtered items reordered for display.
    pub fn view(&self, filter: &CategoryFilter, criterion: SortCriterion) -> Vec<Item> {
        self.sorted(&self.list(filter), criterion)
    }

    /// Returns each category present, in order of first appearance.
    ///
    /// Recomputed from the full list on every call.
    pub fn distinct_categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(Item::category)
            .filter(|category| seen.insert(*category))
            .map(str::to_string)
            .collect()
    }

    /// Returns filter selector values, the `"all"` sentinel first.
    pub fn filter_options(&self) -> Vec<String> {
        filter_options(&self.distinct_categories())
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Stored items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Writes the full list to the slot and reports the outcome.
    ///
    /// A successful write clears any retained persistence error.
    ///
    /// # Errors
    /// - `Encode` or `Write` when the slot could not be updated.
    pub fn save(&mut self) -> Result<(), PersistenceError> {
        match self.write_items() {
            Ok(()) => {
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                log_write_failure(&err);
                Err(err)
            }
        }
    }

    /// Most recent unresolved load failure or automatic-write failure.
    pub fn last_persistence_error(&self) -> Option<&PersistenceError> {
        self.last_error.as_ref()
    }

    /// Takes the retained persistence error, e.g. to surface it once.
    pub fn take_persistence_error(&mut self) -> Option<PersistenceError> {
        self.last_error.take()
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    fn persist(&mut self) {
        match self.write_items() {
            Ok(()) => {
                if self.last_error.take().is_some() {
                    info!("event=store_persist module=store status=recovered");
                }
            }
            Err(err) => {
                log_write_failure(&err);
                self.last_error = Some(err);
            }
        }
    }

    fn write_items(&mut self) -> Result<(), PersistenceError> {
        let encoded = serde_json::to_string(&self.items).map_err(PersistenceError::Encode)?;
        self.backend
            .set(&self.storage_key, &encoded)
            .map_err(PersistenceError::Write)
    }
}

fn read_items<S: KeyValueStore>(backend: &S, key: &str) -> Result<Vec<Item>, PersistenceError> {
    let Some(raw) = backend.get(key).map_err(PersistenceError::Read)? else {
        return Ok(Vec::new());
    };

    let items: Vec<Item> = serde_json::from_str(&raw).map_err(PersistenceError::Decode)?;

    let mut ids = HashSet::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if !ids.insert(item.id()) {
            return Err(PersistenceError::Invalid(format!(
                "duplicate id {} at index {index}",
                item.id()
            )));
        }
    }
    Ok(items)
}

fn log_write_failure(err: &PersistenceError) {
    warn!(
        "event=store_persist module=store status=degraded mode=memory_only error_code={} error={}",
        err.code(),
        err
    );
}
