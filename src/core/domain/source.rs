//! Collaborator seams the finder queries.
//!
//! The finder never talks to the network itself; it depends on these traits,
//! implemented for the live API by
//! [`ZabbixApi`](crate::core::infrastructure::zabbix_api::ZabbixApi) and by
//! mocks in tests.

use crate::core::domain::{
    error::CmdbResult,
    model::{HistoryPartition, HistoryRecord, HostInterface, MonitoringItem, SearchPattern},
    value_object::HostId,
};
use async_trait::async_trait;

/// Parameters of an item lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    /// Hosts to search.
    pub host_ids: Vec<HostId>,
    /// Restricts the result by key or name; `None` returns every item.
    pub pattern: Option<SearchPattern>,
    /// Only return items with an active status.
    pub active_only: bool,
    /// Maximum number of items to return.
    pub limit: Option<usize>,
}

impl ItemQuery {
    /// Active items of a single host.
    pub fn for_host(host_id: &HostId) -> Self {
        Self {
            host_ids: vec![host_id.clone()],
            pattern: None,
            active_only: true,
            limit: None,
        }
    }

    pub fn with_pattern(mut self, pattern: SearchPattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Parameters of a history lookup. Results are sorted newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub item_id: String,
    pub partition: HistoryPartition,
    pub limit: usize,
}

impl HistoryQuery {
    /// The single most recent value of an item.
    pub fn latest(item_id: impl Into<String>, partition: HistoryPartition) -> Self {
        Self {
            item_id: item_id.into(),
            partition,
            limit: 1,
        }
    }
}

/// Source of monitoring items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemSource: Send + Sync {
    async fn get_items(&self, query: &ItemQuery) -> CmdbResult<Vec<MonitoringItem>>;
}

/// Source of historical item values.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistorySource: Send + Sync {
    async fn get_history(&self, query: &HistoryQuery) -> CmdbResult<Vec<HistoryRecord>>;
}

/// Source of host interfaces.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InterfaceSource: Send + Sync {
    async fn get_interfaces(&self, host_ids: &[HostId]) -> CmdbResult<Vec<HostInterface>>;
}
