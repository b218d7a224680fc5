//! Search patterns used to locate items on a host.

#[cfg(test)]
use crate::core::domain::model::monitoring_item::MonitoringItem;
use std::borrow::Cow;
use std::fmt;

/// One step of an ordered item search.
///
/// Patterns are const-constructible so metric tables can live in `static`
/// slices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SearchPattern {
    /// The item key equals the value exactly.
    ExactKey(Cow<'static, str>),
    /// The item name contains the value.
    NameContains(Cow<'static, str>),
    /// The item key contains the value.
    KeyContains(Cow<'static, str>),
}

impl SearchPattern {
    pub const fn exact_key(key: &'static str) -> Self {
        SearchPattern::ExactKey(Cow::Borrowed(key))
    }

    pub const fn name_contains(name: &'static str) -> Self {
        SearchPattern::NameContains(Cow::Borrowed(name))
    }

    pub const fn key_contains(key: &'static str) -> Self {
        SearchPattern::KeyContains(Cow::Borrowed(key))
    }

    /// Returns the raw pattern text.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            SearchPattern::ExactKey(v)
            | SearchPattern::NameContains(v)
            | SearchPattern::KeyContains(v) => v,
        }
    }

    /// Evaluates the pattern against an item locally.
    ///
    /// Exact keys compare byte for byte; substring modes are case-insensitive,
    /// like the API's wildcard search.
    #[cfg(test)]
    pub(crate) fn matches(&self, item: &MonitoringItem) -> bool {
        match self {
            SearchPattern::ExactKey(key) => item.key == *key,
            SearchPattern::NameContains(name) => contains_ignore_case(&item.name, name),
            SearchPattern::KeyContains(key) => contains_ignore_case(&item.key, key),
        }
    }
}

#[cfg(test)]
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchPattern::ExactKey(v) => write!(f, "key = {}", v),
            SearchPattern::NameContains(v) => write!(f, "name ~ *{}*", v),
            SearchPattern::KeyContains(v) => write!(f, "key ~ *{}*", v),
        }
    }
}
