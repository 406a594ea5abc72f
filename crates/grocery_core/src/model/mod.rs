//! Grocery list domain model.
//!
//! # Responsibility
//! - Define the single entity persisted by the item store.
//!
//! # Invariants
//! - Every item is identified by an `ItemId` unique within its store.
//! - Items are immutable once created; there is no update path.

pub mod item;
