//! Item store: the owner of the grocery list and its persisted mirror.
//!
//! # Responsibility
//! - Hold the authoritative, insertion-ordered item sequence.
//! - Mirror the full sequence to one key-value slot after every mutation.
//! - Recover from unreadable or unwritable storage without failing callers.
//!
//! # Invariants
//! - Item ids are unique within a store for its whole lifetime.
//! - Stored order is insertion order; sorting only happens on copies.
//! - A rejected add leaves both memory and storage untouched.

mod id;
mod item_store;

pub use item_store::{ItemStore, PersistenceError, DEFAULT_STORAGE_KEY};
