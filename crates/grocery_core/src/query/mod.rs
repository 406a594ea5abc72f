//! View-time queries over item sequences.
//!
//! # Responsibility
//! - Filter items by category and reorder them for display.
//! - Keep all view transformations pure; stored order is never touched.
//!
//! # Invariants
//! - Sorting is stable: equal keys keep their input order.
//! - The filter value `"all"` means no category restriction.

pub mod filter;
pub mod sort;
