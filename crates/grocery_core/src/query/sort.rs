//! Sort criteria and the pure `sorted` transformation.

use crate::model::item::Item;
use icu_collator::{Collator, CollatorOptions, Strength};
use log::warn;
use std::cmp::Ordering;

/// Named display order for an item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortCriterion {
    /// Ascending by name, locale-aware.
    Name,
    /// Descending by name, locale-aware.
    NameDesc,
    /// Newest first.
    Date,
    /// Oldest first.
    DateAsc,
    /// Input order is kept.
    #[default]
    Unchanged,
}

impl SortCriterion {
    /// Parses a criterion from its wire value.
    ///
    /// Unknown values map to `Unchanged` instead of failing, so a stale or
    /// unexpected selector value simply leaves the list as-is.
    pub fn parse(value: &str) -> Self {
        match value {
            "name" => Self::Name,
            "name-desc" => Self::NameDesc,
            "date" => Self::Date,
            "date-asc" => Self::DateAsc,
            _ => Self::Unchanged,
        }
    }

    /// Returns the wire value, or `None` for `Unchanged`.
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Self::Name => Some("name"),
            Self::NameDesc => Some("name-desc"),
            Self::Date => Some("date"),
            Self::DateAsc => Some("date-asc"),
            Self::Unchanged => None,
        }
    }
}

impl From<&str> for SortCriterion {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Returns a reordered copy of `items`. The input is not modified.
pub fn sorted(items: &[Item], criterion: SortCriterion) -> Vec<Item> {
    let mut result = items.to_vec();
    match criterion {
        SortCriterion::Name => result.sort_by(|a, b| compare_names(a.name(), b.name())),
        SortCriterion::NameDesc => result.sort_by(|a, b| compare_names(b.name(), a.name())),
        SortCriterion::Date => result.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        SortCriterion::DateAsc => result.sort_by(|a, b| a.created_at().cmp(&b.created_at())),
        SortCriterion::Unchanged => {}
    }
    result
}

/// Compares two display strings the way a human-facing list expects.
///
/// Uses root-locale collation at tertiary strength: letters compare before
/// accents, accents before case, and lowercase sorts before uppercase, so
/// `apple < Banana < Éclair < Fig`. Strings the collator considers equal
/// fall back to code-point order.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => fold_case_compare(a, b),
        })
        .then_with(|| a.cmp(b))
}

thread_local! {
    static ROOT_COLLATOR: Option<Collator> = root_collator();
}

fn root_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);
    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(err) => {
            warn!("event=collator_init module=query status=degraded fallback=case_fold error={err}");
            None
        }
    }
}

// Used only when collation data cannot be loaded.
fn fold_case_compare(a: &str, b: &str) -> Ordering {
    let folded = |value: &str| value.chars().flat_map(char::to_lowercase).collect::<String>();
    folded(a).cmp(&folded(b)).then_with(|| {
        a.chars()
            .map(char::is_uppercase)
            .cmp(b.chars().map(char::is_uppercase))
    })
}

#[cfg(test)]
mod tests {
    use super::{compare_names, fold_case_compare, SortCriterion};
    use std::cmp::Ordering;

    #[test]
    fn parse_maps_known_values_and_falls_back_to_unchanged() {
        assert_eq!(SortCriterion::parse("name"), SortCriterion::Name);
        assert_eq!(SortCriterion::parse("name-desc"), SortCriterion::NameDesc);
        assert_eq!(SortCriterion::parse("date"), SortCriterion::Date);
        assert_eq!(SortCriterion::parse("date-asc"), SortCriterion::DateAsc);
        assert_eq!(SortCriterion::parse("Name"), SortCriterion::Unchanged);
        assert_eq!(SortCriterion::parse(""), SortCriterion::Unchanged);
        assert_eq!(SortCriterion::Unchanged.as_str(), None);
    }

    #[test]
    fn compare_names_ignores_case_first() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Banana", "cherry"), Ordering::Less);
        assert_eq!(compare_names("Zucchini", "apple"), Ordering::Greater);
    }

    #[test]
    fn compare_names_breaks_case_ties_lowercase_first() {
        assert_eq!(compare_names("apple", "Apple"), Ordering::Less);
        assert_eq!(compare_names("Apple", "apple"), Ordering::Greater);
        assert_eq!(compare_names("apple", "apple"), Ordering::Equal);
    }

    #[test]
    fn compare_names_orders_prefixes_first() {
        assert_eq!(compare_names("Milk", "milkshake"), Ordering::Less);
    }

    #[test]
    fn compare_names_places_accented_letters_with_their_base() {
        assert_eq!(compare_names("Éclair", "Fig"), Ordering::Less);
        assert_eq!(compare_names("Äpfel", "Birnen"), Ordering::Less);
        assert_eq!(compare_names("Eclair", "Éclair"), Ordering::Less);
        assert_eq!(compare_names("Jalapeno", "Jalapeño"), Ordering::Less);
        assert_eq!(compare_names("Jalapeño", "Jalapenos"), Ordering::Less);
    }

    #[test]
    fn fold_case_compare_keeps_lowercase_first() {
        assert_eq!(fold_case_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(fold_case_compare("apple", "Apple"), Ordering::Less);
    }
}
