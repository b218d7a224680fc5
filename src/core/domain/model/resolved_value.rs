use crate::core::domain::model::monitoring_item::MonitoringItem;
use serde::Serialize;

/// The outcome of a successful item search.
///
/// `value` is `None` when the item exists but neither carries a last value
/// nor has any history. "No item found" is represented by the absence of a
/// `ResolvedValue` altogether.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedValue {
    /// The item that won the search.
    pub item: MonitoringItem,
    /// The current or most recent historical value.
    pub value: Option<String>,
}

impl ResolvedValue {
    /// Returns the value as a string slice.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}
