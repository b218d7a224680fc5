//! Ordered fallback search over a host's monitoring items.

use crate::{
    FinderConfig,
    core::domain::{
        error::CmdbResult,
        model::{MonitoringItem, ResolvedValue, SearchPattern},
        source::{HistoryQuery, HistorySource, InterfaceSource, ItemQuery, ItemSource},
        value_object::HostId,
    },
    finder::patterns::Metric,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves semantic host metrics from inconsistently named items.
///
/// The finder holds no mutable state: resolving the same host twice against
/// identical responses yields identical results, and clones can be used from
/// several tasks at once.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use zabbix_cmdb::{CmdbResult, HostId, ItemFinder};
/// # use zabbix_cmdb::core::infrastructure::zabbix_api::ZabbixApi;
///
/// # async fn run(api: Arc<ZabbixApi>) -> CmdbResult<()> {
/// let finder = ItemFinder::new(api);
/// let host = HostId::new("10084")?;
/// if let Some(cpus) = finder.find_cpu_count(&host).await? {
///     println!("{} CPUs (from {})", cpus.value().unwrap_or("-"), cpus.item.key);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ItemFinder {
    pub(crate) items: Arc<dyn ItemSource>,
    pub(crate) history: Arc<dyn HistorySource>,
    pub(crate) interfaces: Arc<dyn InterfaceSource>,
    pub(crate) config: FinderConfig,
}

impl ItemFinder {
    /// Creates a finder over a single source implementing all collaborators.
    pub fn new<S>(source: Arc<S>) -> Self
    where
        S: ItemSource + HistorySource + InterfaceSource + 'static,
    {
        Self {
            items: source.clone(),
            history: source.clone(),
            interfaces: source,
            config: FinderConfig::default(),
        }
    }

    /// Creates a finder over separate collaborators.
    pub fn from_sources(
        items: Arc<dyn ItemSource>,
        history: Arc<dyn HistorySource>,
        interfaces: Arc<dyn InterfaceSource>,
    ) -> Self {
        Self {
            items,
            history,
            interfaces,
            config: FinderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FinderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Evaluates `patterns` in order against the active items of a host.
    ///
    /// Each pattern is queried with a limit of one item. The first pattern
    /// that yields an item wins and no later pattern is queried, even when
    /// the winning item has no value.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` if no pattern matched any item
    /// * `Ok(Some(v))` with `v.value == None` if the item has neither a last
    ///   value nor history
    ///
    /// # Errors
    ///
    /// Returns the item source error of the first failing query. History
    /// failures are logged and yield an empty value instead.
    pub async fn find_item(
        &self,
        host_id: &HostId,
        patterns: &[SearchPattern],
    ) -> CmdbResult<Option<ResolvedValue>> {
        for pattern in patterns {
            let query = ItemQuery::for_host(host_id)
                .with_pattern(pattern.clone())
                .with_limit(1);
            let items = self.items.get_items(&query).await?;

            if let Some(item) = items.into_iter().next() {
                debug!(host_id = %host_id, %pattern, key = %item.key, "item pattern matched");
                let value = self.resolve_value(host_id, &item).await;
                return Ok(Some(ResolvedValue { item, value }));
            }
        }

        debug!(host_id = %host_id, "no item pattern matched");
        Ok(None)
    }

    async fn resolve_value(&self, host_id: &HostId, item: &MonitoringItem) -> Option<String> {
        if let Some(value) = item.non_empty_last_value() {
            return Some(value.to_string());
        }

        let query = HistoryQuery::latest(&item.item_id, item.value_type.history_partition());
        match self.history.get_history(&query).await {
            Ok(records) => records.into_iter().next().map(|record| record.value),
            Err(e) => {
                warn!(
                    host_id = %host_id,
                    item_id = %item.item_id,
                    error = %e,
                    "history lookup failed, treating value as empty"
                );
                None
            }
        }
    }

    /// Resolves one of the built-in metrics.
    ///
    /// # Errors
    ///
    /// Item source failures are returned as `CmdbError::Metric` carrying the
    /// host id and metric name.
    pub async fn find_metric(
        &self,
        host_id: &HostId,
        metric: Metric,
    ) -> CmdbResult<Option<ResolvedValue>> {
        self.find_item(host_id, metric.patterns())
            .await
            .map_err(|e| e.for_metric(host_id, metric.name()))
    }

    /// Number of CPUs.
    pub async fn find_cpu_count(&self, host_id: &HostId) -> CmdbResult<Option<ResolvedValue>> {
        self.find_metric(host_id, Metric::CpuCount).await
    }

    /// CPU utilization in percent.
    pub async fn find_cpu_usage(&self, host_id: &HostId) -> CmdbResult<Option<ResolvedValue>> {
        self.find_metric(host_id, Metric::CpuUsage).await
    }

    /// Total memory in bytes.
    pub async fn find_memory_total(&self, host_id: &HostId) -> CmdbResult<Option<ResolvedValue>> {
        self.find_metric(host_id, Metric::MemoryTotal).await
    }

    /// Memory utilization in percent.
    pub async fn find_memory_usage(&self, host_id: &HostId) -> CmdbResult<Option<ResolvedValue>> {
        self.find_metric(host_id, Metric::MemoryUsage).await
    }

    /// Raw `uname` style kernel string.
    pub async fn find_kernel_version(
        &self,
        host_id: &HostId,
    ) -> CmdbResult<Option<ResolvedValue>> {
        self.find_metric(host_id, Metric::KernelVersion).await
    }

    pub async fn find_system_name(&self, host_id: &HostId) -> CmdbResult<Option<ResolvedValue>> {
        self.find_metric(host_id, Metric::SystemName).await
    }

    pub async fn find_operating_system(
        &self,
        host_id: &HostId,
    ) -> CmdbResult<Option<ResolvedValue>> {
        self.find_metric(host_id, Metric::OperatingSystem).await
    }

    pub async fn find_os_architecture(
        &self,
        host_id: &HostId,
    ) -> CmdbResult<Option<ResolvedValue>> {
        self.find_metric(host_id, Metric::OsArchitecture).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CmdbError,
        core::domain::{
            model::{HistoryPartition, HistoryRecord, ValueType},
            source::{MockHistorySource, MockInterfaceSource, MockItemSource},
        },
        tests::support::item,
    };
    use mockall::Sequence;

    fn host() -> HostId {
        HostId::new_unchecked("10084")
    }

    fn finder(items: MockItemSource, history: MockHistorySource) -> ItemFinder {
        ItemFinder::from_sources(
            Arc::new(items),
            Arc::new(history),
            Arc::new(MockInterfaceSource::new()),
        )
    }

    fn pattern_is(query: &ItemQuery, expected: &SearchPattern) -> bool {
        query.pattern.as_ref() == Some(expected)
            && query.limit == Some(1)
            && query.active_only
            && query.host_ids == [host()]
    }

    #[tokio::test]
    async fn test_first_matching_pattern_stops_search() {
        let patterns = Metric::CpuCount.patterns();
        let mut items = MockItemSource::new();
        let mut seq = Sequence::new();

        for (index, pattern) in patterns.iter().take(3).enumerate() {
            let expected = pattern.clone();
            items
                .expect_get_items()
                .withf(move |q| pattern_is(q, &expected))
                .times(1)
                .in_sequence(&mut seq)
                .returning(move |_| {
                    if index == 2 {
                        Ok(vec![item("1", "Number of cores", "custom.cores", Some("4"), ValueType::Uint)])
                    } else {
                        Ok(vec![])
                    }
                });
        }
        // Any query for patterns 4..6 would hit no expectation and panic.

        let result = finder(items, MockHistorySource::new())
            .find_cpu_count(&host())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.value(), Some("4"));
        assert_eq!(result.item.key, "custom.cores");
    }

    #[tokio::test]
    async fn test_exact_key_match_queries_once() {
        let mut items = MockItemSource::new();
        items.expect_get_items().times(1).returning(|_| {
            Ok(vec![item("1", "CPU utilization", "system.cpu.util[,avg1]", Some("12.5"), ValueType::Float)])
        });

        let result = finder(items, MockHistorySource::new())
            .find_cpu_usage(&host())
            .await
            .unwrap();
        assert_eq!(result.unwrap().value(), Some("12.5"));
    }

    #[tokio::test]
    async fn test_no_match_is_none_after_all_patterns() {
        let mut items = MockItemSource::new();
        items
            .expect_get_items()
            .times(Metric::OsArchitecture.patterns().len())
            .returning(|_| Ok(vec![]));

        let result = finder(items, MockHistorySource::new())
            .find_os_architecture(&host())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_empty_last_value_falls_back_to_history() {
        let mut items = MockItemSource::new();
        items.expect_get_items().times(1).returning(|_| {
            Ok(vec![item("77", "Total memory", "vm.memory.size[total]", Some(""), ValueType::Uint)])
        });

        let mut history = MockHistorySource::new();
        history
            .expect_get_history()
            .withf(|q| {
                q.item_id == "77" && q.partition == HistoryPartition::Unsigned && q.limit == 1
            })
            .times(1)
            .returning(|_| {
                Ok(vec![HistoryRecord {
                    item_id: "77".to_string(),
                    clock: Some(1_700_000_000),
                    value: "8589934592".to_string(),
                }])
            });

        let result = finder(items, history)
            .find_memory_total(&host())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.value(), Some("8589934592"));
    }

    #[tokio::test]
    async fn test_textual_items_use_textual_history() {
        let mut items = MockItemSource::new();
        items
            .expect_get_items()
            .times(1)
            .returning(|_| Ok(vec![item("5", "System uname", "system.uname", None, ValueType::Text)]));

        let mut history = MockHistorySource::new();
        history
            .expect_get_history()
            .withf(|q| q.partition == HistoryPartition::Textual)
            .times(1)
            .returning(|_| Ok(vec![]));

        let result = finder(items, history)
            .find_kernel_version(&host())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.value, None);
        assert_eq!(result.item.item_id, "5");
    }

    #[tokio::test]
    async fn test_history_failure_degrades_to_empty_value() {
        let mut items = MockItemSource::new();
        items
            .expect_get_items()
            .times(1)
            .returning(|_| Ok(vec![item("9", "Hostname", "system.hostname", None, ValueType::Str)]));

        let mut history = MockHistorySource::new();
        history
            .expect_get_history()
            .times(1)
            .returning(|_| Err(CmdbError::Connection("reset by peer".to_string())));

        let result = finder(items, history)
            .find_system_name(&host())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.value, None);
    }

    #[tokio::test]
    async fn test_item_failure_carries_host_and_metric() {
        let mut items = MockItemSource::new();
        items.expect_get_items().times(1).returning(|_| {
            Err(CmdbError::Api {
                code: -32500,
                message: "Application error.".to_string(),
                data: "No permissions".to_string(),
            })
        });

        let result = finder(items, MockHistorySource::new())
            .find_memory_usage(&host())
            .await;
        match result {
            Err(CmdbError::Metric {
                host_id, metric, source,
            }) => {
                assert_eq!(host_id, "10084");
                assert_eq!(metric, "memory_usage");
                assert!(matches!(*source, CmdbError::Api { code: -32500, .. }));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_repeated_lookups_are_identical() {
        let mut items = MockItemSource::new();
        items.expect_get_items().times(2).returning(|_| {
            Ok(vec![item("3", "Operating system", "system.sw.os", Some("Ubuntu 22.04.4 LTS"), ValueType::Str)])
        });

        let finder = finder(items, MockHistorySource::new());
        let first = finder.find_operating_system(&host()).await.unwrap();
        let second = finder.find_operating_system(&host()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.unwrap().value(), Some("Ubuntu 22.04.4 LTS"));
    }

    #[tokio::test]
    async fn test_custom_patterns() {
        let mut items = MockItemSource::new();
        items
            .expect_get_items()
            .withf(|q| q.pattern == Some(SearchPattern::key_contains("agent.version")))
            .times(1)
            .returning(|_| Ok(vec![item("11", "Version of agent", "agent.version", Some("7.0.2"), ValueType::Str)]));

        let patterns = [SearchPattern::key_contains("agent.version")];
        let result = finder(items, MockHistorySource::new())
            .find_item(&host(), &patterns)
            .await
            .unwrap();
        assert_eq!(result.unwrap().value(), Some("7.0.2"));
    }
}
