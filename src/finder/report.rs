//! Per-host inventory rows and totals across hosts.
//!
//! A report runs every metric lookup for a host. A failing lookup is logged
//! with its host and metric and leaves only that field empty.

use crate::{
    core::domain::{
        error::CmdbResult,
        model::{FilesystemMetric, HostAvailability, HostInterface, ResolvedValue},
        value_object::HostId,
    },
    finder::{
        format::{self, parse_number},
        item_finder::ItemFinder,
        patterns::Metric,
    },
};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};

/// A host handed over by the listing glue.
#[derive(Debug, Clone, PartialEq)]
pub struct HostRef {
    pub host_id: HostId,
    /// Technical host name.
    pub host: String,
    /// Visible name.
    pub name: String,
    /// Interfaces already fetched with the host, if any.
    pub interfaces: Option<Vec<HostInterface>>,
    /// Inventory `contact` field.
    pub customer: Option<String>,
    /// Inventory `type_full` field.
    pub product: Option<String>,
}

impl HostRef {
    pub fn new(host_id: HostId, host: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            host_id,
            host: host.into(),
            name: name.into(),
            interfaces: None,
            customer: None,
            product: None,
        }
    }

    pub fn with_interfaces(mut self, interfaces: Vec<HostInterface>) -> Self {
        self.interfaces = Some(interfaces);
        self
    }

    /// Sets the inventory `contact` and `type_full` fields. Empty values are
    /// treated as absent.
    pub fn with_inventory(mut self, contact: &str, type_full: &str) -> Self {
        let present = |v: &str| (!v.trim().is_empty()).then(|| v.to_string());
        self.customer = present(contact);
        self.product = present(type_full);
        self
    }
}

/// One inventory row. `None` fields render as `-`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostReport {
    pub host_id: HostId,
    pub host: String,
    pub name: String,
    pub availability: HostAvailability,
    /// Raw CPU count value.
    pub cpu_total: Option<String>,
    /// CPU utilization, e.g. `12.5%`.
    pub cpu_usage: Option<String>,
    /// Formatted memory size, e.g. `15.5 GB`.
    pub memory_total: Option<String>,
    /// Memory utilization, e.g. `41.02%`.
    pub memory_usage: Option<String>,
    /// Formatted total storage.
    pub storage_total: Option<String>,
    pub disk_usage: Vec<FilesystemMetric>,
    /// Shortened kernel version.
    pub kernel_version: Option<String>,
    pub system_name: Option<String>,
    pub operating_system: Option<String>,
    pub os_architecture: Option<String>,
    pub customer: Option<String>,
    pub product: Option<String>,
    #[serde(skip)]
    pub(crate) cpu_count: Option<i64>,
    #[serde(skip)]
    pub(crate) memory_bytes: Option<i64>,
    #[serde(skip)]
    pub(crate) storage_bytes: Option<i64>,
}

/// Sums across a set of host reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct InventoryTotals {
    pub hosts: usize,
    pub cpu_count: i64,
    pub memory_bytes: i64,
    pub storage_bytes: i64,
}

impl InventoryTotals {
    /// Sums the integer part of each host's CPU count, memory and storage.
    ///
    /// Sums saturate at `i64::MAX`.
    pub fn from_reports(reports: &[HostReport]) -> Self {
        reports.iter().fold(
            Self {
                hosts: reports.len(),
                ..Default::default()
            },
            |mut totals, report| {
                totals.cpu_count = totals
                    .cpu_count
                    .saturating_add(report.cpu_count.unwrap_or(0));
                totals.memory_bytes = totals
                    .memory_bytes
                    .saturating_add(report.memory_bytes.unwrap_or(0));
                totals.storage_bytes = totals
                    .storage_bytes
                    .saturating_add(report.storage_bytes.unwrap_or(0));
                totals
            },
        )
    }

    /// Formatted total memory.
    pub fn memory(&self) -> String {
        format::format_bytes(self.memory_bytes as f64)
    }

    /// Formatted total storage.
    pub fn storage(&self) -> String {
        format::format_bytes(self.storage_bytes as f64)
    }
}

fn integer_part(raw: &str) -> Option<i64> {
    parse_number(raw).map(|v| v.trunc() as i64)
}

/// Keeps a lookup result, logging and discarding failures.
fn degrade<T>(host_id: &HostId, metric: &str, result: CmdbResult<Option<T>>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(host_id = %host_id, metric, error = %e, "metric lookup failed");
            None
        }
    }
}

fn value_of(resolved: Option<ResolvedValue>) -> Option<String> {
    resolved.and_then(|r| r.value)
}

impl ItemFinder {
    async fn metric_value(&self, host_id: &HostId, metric: Metric) -> Option<String> {
        value_of(degrade(
            host_id,
            metric.name(),
            self.find_metric(host_id, metric).await,
        ))
    }

    /// Builds the inventory row of one host.
    pub async fn host_report(&self, host: &HostRef) -> HostReport {
        let id = &host.host_id;

        let availability = self
            .get_availability(id, host.interfaces.as_deref())
            .await;

        let cpu_total = self.metric_value(id, Metric::CpuCount).await;
        let cpu_usage = self
            .metric_value(id, Metric::CpuUsage)
            .await
            .and_then(|v| format::format_percentage(&v));
        let memory_raw = self.metric_value(id, Metric::MemoryTotal).await;
        let memory_usage = self
            .metric_value(id, Metric::MemoryUsage)
            .await
            .and_then(|v| format::format_percentage(&v));
        let storage = degrade(id, "storage_total", self.find_storage_total(id).await);
        let disk_usage =
            degrade(id, "disk_usage", self.find_disk_usage(id).await).unwrap_or_default();
        let kernel_version = self
            .metric_value(id, Metric::KernelVersion)
            .await
            .map(|v| format::extract_kernel_info(&v));
        let system_name = self.metric_value(id, Metric::SystemName).await;
        let operating_system = self.metric_value(id, Metric::OperatingSystem).await;
        let os_architecture = self.metric_value(id, Metric::OsArchitecture).await;

        HostReport {
            host_id: id.clone(),
            host: host.host.clone(),
            name: host.name.clone(),
            availability,
            cpu_count: cpu_total.as_deref().and_then(integer_part),
            cpu_total,
            cpu_usage,
            memory_bytes: memory_raw.as_deref().and_then(integer_part),
            memory_total: memory_raw.as_deref().map(format::format_memory_size),
            memory_usage,
            storage_bytes: storage.map(|v| v.trunc() as i64),
            storage_total: storage.map(format::format_bytes),
            disk_usage,
            kernel_version,
            system_name,
            operating_system,
            os_architecture,
            customer: host.customer.clone(),
            product: host.product.clone(),
        }
    }

    /// Builds the rows of several hosts, in input order.
    ///
    /// Up to `FinderConfig::concurrency` hosts are resolved at once.
    pub async fn host_reports(&self, hosts: &[HostRef]) -> Vec<HostReport> {
        let concurrency = self.config.concurrency.max(1);
        info!(hosts = hosts.len(), concurrency, "resolving host inventory");

        stream::iter(hosts)
            .map(|host| self.host_report(host))
            .buffered(concurrency)
            .collect()
            .await
    }
}
