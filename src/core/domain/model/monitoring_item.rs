//! Domain models for monitoring items and their history.
//!
//! This module defines the structures returned by the `item.get` and
//! `history.get` methods of the Zabbix API.

use crate::core::domain::value_object::serde_helpers;
use serde::{Deserialize, Serialize};

/// The declared type of the values an item collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    /// Numeric float (`0`).
    #[default]
    Float,
    /// Character string (`1`).
    Str,
    /// Log line (`2`).
    Log,
    /// Numeric unsigned (`3`).
    Uint,
    /// Free text (`4`).
    Text,
    /// Any code this crate does not model (e.g. binary).
    Other(u8),
}

impl From<u8> for ValueType {
    fn from(code: u8) -> Self {
        match code {
            0 => ValueType::Float,
            1 => ValueType::Str,
            2 => ValueType::Log,
            3 => ValueType::Uint,
            4 => ValueType::Text,
            other => ValueType::Other(other),
        }
    }
}

impl From<ValueType> for u8 {
    fn from(value: ValueType) -> Self {
        match value {
            ValueType::Float => 0,
            ValueType::Str => 1,
            ValueType::Log => 2,
            ValueType::Uint => 3,
            ValueType::Text => 4,
            ValueType::Other(code) => code,
        }
    }
}

impl ValueType {
    /// Returns the history partition that stores past values of this type.
    #[must_use]
    pub fn history_partition(self) -> HistoryPartition {
        match self {
            ValueType::Uint => HistoryPartition::Unsigned,
            ValueType::Str | ValueType::Text | ValueType::Log => HistoryPartition::Textual,
            ValueType::Float | ValueType::Other(_) => HistoryPartition::Float,
        }
    }
}

/// Whether an item is being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemStatus {
    #[default]
    Active,
    Disabled,
    Other(u8),
}

impl From<u8> for ItemStatus {
    fn from(code: u8) -> Self {
        match code {
            0 => ItemStatus::Active,
            1 => ItemStatus::Disabled,
            other => ItemStatus::Other(other),
        }
    }
}

impl From<ItemStatus> for u8 {
    fn from(status: ItemStatus) -> Self {
        match status {
            ItemStatus::Active => 0,
            ItemStatus::Disabled => 1,
            ItemStatus::Other(code) => code,
        }
    }
}

/// A monitoring item as returned by `item.get`.
///
/// Items are read-only views; the finder never creates or mutates them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MonitoringItem {
    /// The item identifier.
    #[serde(rename = "itemid", deserialize_with = "serde_helpers::stringly")]
    pub item_id: String,
    /// Visible item name (e.g. "Number of CPUs").
    #[serde(default)]
    pub name: String,
    /// Item key (e.g. `system.cpu.num`).
    #[serde(rename = "key_")]
    pub key: String,
    /// Last collected value, if any.
    #[serde(
        rename = "lastvalue",
        default,
        deserialize_with = "serde_helpers::opt_stringly",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_value: Option<String>,
    /// Unix time of the last collected value.
    #[serde(
        rename = "lastclock",
        default,
        deserialize_with = "serde_helpers::opt_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_clock: Option<i64>,
    /// Declared value type.
    #[serde(default, with = "serde_helpers::code")]
    pub value_type: ValueType,
    /// Collection status.
    #[serde(default, with = "serde_helpers::code")]
    pub status: ItemStatus,
}

impl MonitoringItem {
    /// Returns the last value when it is present and non-empty.
    #[must_use]
    pub fn non_empty_last_value(&self) -> Option<&str> {
        self.last_value.as_deref().filter(|v| !v.is_empty())
    }
}

/// The history store an item's past values live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryPartition {
    /// Numeric float history.
    Float,
    /// Unsigned integer history.
    Unsigned,
    /// Character, text and log history.
    Textual,
}

impl HistoryPartition {
    /// The `history` parameter code of `history.get`.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            HistoryPartition::Float => 0,
            HistoryPartition::Textual => 1,
            HistoryPartition::Unsigned => 3,
        }
    }
}

/// A single history data point from `history.get`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HistoryRecord {
    /// The item the value belongs to.
    #[serde(
        rename = "itemid",
        default,
        deserialize_with = "serde_helpers::stringly"
    )]
    pub item_id: String,
    /// Unix time of the value.
    #[serde(
        default,
        deserialize_with = "serde_helpers::opt_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub clock: Option<i64>,
    /// The stored value.
    #[serde(deserialize_with = "serde_helpers::stringly")]
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_from_wire_format() {
        let item: MonitoringItem = serde_json::from_value(serde_json::json!({
            "itemid": "42237",
            "name": "Number of CPUs",
            "key_": "system.cpu.num",
            "lastvalue": "8",
            "lastclock": "1717171717",
            "value_type": "3",
            "status": "0"
        }))
        .unwrap();

        assert_eq!(item.item_id, "42237");
        assert_eq!(item.key, "system.cpu.num");
        assert_eq!(item.non_empty_last_value(), Some("8"));
        assert_eq!(item.last_clock, Some(1_717_171_717));
        assert_eq!(item.value_type, ValueType::Uint);
        assert_eq!(item.status, ItemStatus::Active);
    }

    #[test]
    fn test_item_with_missing_optional_fields() {
        let item: MonitoringItem = serde_json::from_value(serde_json::json!({
            "itemid": 7,
            "key_": "system.uname",
            "lastvalue": ""
        }))
        .unwrap();

        assert_eq!(item.item_id, "7");
        assert_eq!(item.name, "");
        assert_eq!(item.non_empty_last_value(), None);
        assert_eq!(item.value_type, ValueType::Float);
    }

    #[test]
    fn test_history_partition_by_value_type() {
        assert_eq!(ValueType::Float.history_partition(), HistoryPartition::Float);
        assert_eq!(ValueType::Uint.history_partition(), HistoryPartition::Unsigned);
        assert_eq!(ValueType::Str.history_partition(), HistoryPartition::Textual);
        assert_eq!(ValueType::Text.history_partition(), HistoryPartition::Textual);
        assert_eq!(ValueType::Log.history_partition(), HistoryPartition::Textual);
        assert_eq!(ValueType::Other(5).history_partition(), HistoryPartition::Float);
        assert_eq!(HistoryPartition::Unsigned.code(), 3);
        assert_eq!(HistoryPartition::Textual.code(), 1);
    }

    #[test]
    fn test_value_type_codes() {
        for code in 0u8..=6 {
            assert_eq!(u8::from(ValueType::from(code)), code);
        }
    }
}
