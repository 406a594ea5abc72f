//! Category filter values and selector helpers.

use crate::model::item::Item;

/// Reserved filter value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

/// Category restriction applied when listing items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive category match.
    Category(String),
}

impl CategoryFilter {
    /// Parses a selector value; `"all"` maps to `All`.
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }

    /// Returns the selector value for this filter.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(category) => category.as_str(),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => item.category() == category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<Option<&str>> for CategoryFilter {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::All, Self::parse)
    }
}

/// Keeps `selected` if its category is still present, otherwise `All`.
///
/// Used after a mutation that may have removed the last item of the
/// selected category.
pub fn resolve_filter(selected: &CategoryFilter, categories: &[String]) -> CategoryFilter {
    match selected {
        CategoryFilter::Category(category) if categories.contains(category) => selected.clone(),
        _ => CategoryFilter::All,
    }
}

/// Builds filter selector values: the `"all"` sentinel first, then each
/// category in the given order.
pub fn filter_options(categories: &[String]) -> Vec<String> {
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(categories.iter().cloned())
        .collect()
}
