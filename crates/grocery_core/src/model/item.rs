//! Grocery item domain model.
//!
//! # Responsibility
//! - Define the canonical record stored by `ItemStore`.
//! - Own the presence checks applied to names and categories.
//!
//! # Invariants
//! - `name` and `category` are non-empty after trimming whitespace.
//! - `created_at` is fixed at creation and never changes.
//! - Items are only created by the store; fields are read-only outside the crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identifier of a grocery item.
///
/// Wall-clock-derived epoch milliseconds, adjusted by the store so that no
/// two items ever share a value.
pub type ItemId = i64;

/// Rejection reason for an item that fails presence checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Name is empty or whitespace only.
    EmptyName,
    /// Category is empty or whitespace only.
    EmptyCategory,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "item name must not be empty"),
            Self::EmptyCategory => write!(f, "item category must not be empty"),
        }
    }
}

impl Error for ItemValidationError {}

/// One grocery list entry.
///
/// Serialized with the legacy wire field names: `created_at` is written as
/// `date` in RFC 3339 form. Deserialization applies `validate()`, so a
/// decoded item always satisfies the presence invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ItemRecord")]
pub struct Item {
    id: ItemId,
    name: String,
    category: String,
    #[serde(rename = "date")]
    created_at: DateTime<Utc>,
}

/// Unvalidated wire shape of an item.
#[derive(Deserialize)]
struct ItemRecord {
    id: ItemId,
    name: String,
    category: String,
    date: DateTime<Utc>,
}

impl TryFrom<ItemRecord> for Item {
    type Error = ItemValidationError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, record.name, record.category, record.date)
    }
}

impl Item {
    /// Builds an item from already-trimmed input.
    ///
    /// # Errors
    /// - `EmptyName` / `EmptyCategory` when a field is blank.
    pub(crate) fn new(
        id: ItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ItemValidationError> {
        let item = Self {
            id,
            name: name.into(),
            category: category.into(),
            created_at,
        };
        item.validate()?;
        Ok(item)
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Checks the presence invariants.
    ///
    /// Name is checked before category, so input with both fields blank
    /// reports `EmptyName`.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        check_fields(&self.name, &self.category)
    }
}

/// Presence check shared by the add path and `Item::validate`.
pub(crate) fn check_fields(name: &str, category: &str) -> Result<(), ItemValidationError> {
    if name.trim().is_empty() {
        return Err(ItemValidationError::EmptyName);
    }
    if category.trim().is_empty() {
        return Err(ItemValidationError::EmptyCategory);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Item, ItemValidationError};
    use chrono::{DateTime, Utc};

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn new_accepts_present_fields() {
        let item = Item::new(7, "Milk", "dairy", at(1_700_000_000_000)).unwrap();
        assert_eq!(item.id(), 7);
        assert_eq!(item.name(), "Milk");
        assert_eq!(item.category(), "dairy");
        assert_eq!(item.created_at(), at(1_700_000_000_000));
    }

    #[test]
    fn new_rejects_blank_fields() {
        let now = at(0);
        assert_eq!(
            Item::new(1, " ", "dairy", now).unwrap_err(),
            ItemValidationError::EmptyName
        );
        assert_eq!(
            Item::new(1, "Milk", "\t", now).unwrap_err(),
            ItemValidationError::EmptyCategory
        );
        assert_eq!(
            Item::new(1, "", "", now).unwrap_err(),
            ItemValidationError::EmptyName
        );
    }

    #[test]
    fn deserialize_rejects_blank_fields() {
        let value = serde_json::json!({
            "id": 1,
            "name": "   ",
            "category": "dairy",
            "date": "2024-01-01T00:00:00Z"
        });

        let err = serde_json::from_value::<Item>(value).unwrap_err();
        assert!(
            err.to_string().contains("item name must not be empty"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn deserialize_reads_legacy_fields() {
        let item: Item = serde_json::from_str(
            r#"{"id": 42, "name": "Milk", "category": "dairy", "date": "2024-01-01T00:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(item.id(), 42);
        assert_eq!(item.created_at(), at(1_704_067_200_000));
    }
}
