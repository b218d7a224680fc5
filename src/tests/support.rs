//! Shared fixtures: item, interface and report builders, an in-memory
//! Zabbix and a log capture.

use crate::{
    core::domain::{
        error::{CmdbError, CmdbResult},
        model::{
            HistoryRecord, HostAvailability, HostInterface, ItemStatus, MonitoringItem, ValueType,
        },
        source::{HistoryQuery, HistorySource, InterfaceSource, ItemQuery, ItemSource},
        value_object::HostId,
    },
    finder::report::HostReport,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;

pub(crate) fn item(
    id: &str,
    name: &str,
    key: &str,
    last_value: Option<&str>,
    value_type: ValueType,
) -> MonitoringItem {
    MonitoringItem {
        item_id: id.to_string(),
        name: name.to_string(),
        key: key.to_string(),
        last_value: last_value.map(str::to_string),
        last_clock: last_value.map(|_| 1_717_171_717),
        value_type,
        status: ItemStatus::Active,
    }
}

pub(crate) fn interface(id: &str, main: bool, available: u8) -> HostInterface {
    HostInterface {
        interface_id: id.to_string(),
        interface_type: Default::default(),
        main,
        available,
        ip: "127.0.0.1".to_string(),
        dns: String::new(),
        error: String::new(),
    }
}

/// In-memory item, history and interface store keyed by host id.
#[derive(Debug, Default)]
pub(crate) struct FakeZabbix {
    items: HashMap<String, Vec<MonitoringItem>>,
    history: HashMap<String, Vec<HistoryRecord>>,
    interfaces: HashMap<String, Vec<HostInterface>>,
    fail_items: bool,
    item_calls: AtomicUsize,
    interface_calls: AtomicUsize,
}

const GIB: u64 = 1024 * 1024 * 1024;

impl FakeZabbix {
    /// A typical Linux agent host: every metric resolvable by exact key.
    pub(crate) fn linux_host(host_id: &str) -> Self {
        let p = |suffix: &str| format!("{host_id}{suffix}");
        let gib = |n: u64| (n * GIB).to_string();
        let items = vec![
            item(&p("01"), "Number of CPUs", "system.cpu.num", Some("8"), ValueType::Uint),
            item(&p("02"), "CPU utilization", "system.cpu.util", Some("12.3456"), ValueType::Float),
            item(
                &p("03"),
                "Total memory",
                "vm.memory.size[total]",
                Some(gib(16).as_str()),
                ValueType::Uint,
            ),
            item(&p("04"), "Memory utilization", "vm.memory.util", Some("41.5"), ValueType::Float),
            item(
                &p("05"),
                "System uname",
                "system.uname",
                Some("Linux web01 5.15.0-102-generic #112-Ubuntu SMP Tue Mar 5 16:50:32 UTC 2024 x86_64"),
                ValueType::Str,
            ),
            item(&p("06"), "System name", "system.hostname", None, ValueType::Str),
            item(&p("07"), "Operating system", "system.sw.os", Some("Ubuntu 22.04.4 LTS"), ValueType::Str),
            item(&p("08"), "Operating system architecture", "system.sw.arch", Some("x86_64"), ValueType::Str),
            item(
                &p("09"),
                "/: Total space",
                "vfs.fs.size[/,total]",
                Some(gib(100).as_str()),
                ValueType::Uint,
            ),
            item(&p("10"), "/: Space utilization", "vfs.fs.size[/,pused]", Some("63.2"), ValueType::Float),
            item(
                &p("11"),
                "/home: Total space",
                "vfs.fs.size[/home,total]",
                Some(gib(50).as_str()),
                ValueType::Uint,
            ),
            item(
                &p("12"),
                "/home: Used space",
                "vfs.fs.size[/home,used]",
                Some(gib(10).as_str()),
                ValueType::Uint,
            ),
            item(&p("13"), "{#FSNAME}: Total space", "vfs.fs.size[{#FSNAME},total]", Some("1"), ValueType::Uint),
        ];

        let mut fake = Self::default();
        fake.history.insert(
            p("06"),
            vec![HistoryRecord {
                item_id: p("06"),
                clock: Some(1_717_171_000),
                value: "web01".to_string(),
            }],
        );
        fake.items.insert(host_id.to_string(), items);
        fake.interfaces.insert(
            host_id.to_string(),
            vec![interface(&p("1"), false, 2), interface(&p("2"), true, 1)],
        );
        fake
    }

    /// A host with no items and no interfaces.
    pub(crate) fn empty_host(host_id: &str) -> Self {
        let mut fake = Self::default();
        fake.items.insert(host_id.to_string(), Vec::new());
        fake
    }

    pub(crate) fn merge(mut self, other: FakeZabbix) -> Self {
        self.items.extend(other.items);
        self.history.extend(other.history);
        self.interfaces.extend(other.interfaces);
        self
    }

    pub(crate) fn failing_items(mut self) -> Self {
        self.fail_items = true;
        self
    }

    pub(crate) fn item_calls(&self) -> usize {
        self.item_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn interface_calls(&self) -> usize {
        self.interface_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemSource for FakeZabbix {
    async fn get_items(&self, query: &ItemQuery) -> CmdbResult<Vec<MonitoringItem>> {
        self.item_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_items {
            return Err(CmdbError::Connection("connection refused".to_string()));
        }

        let matching = query
            .host_ids
            .iter()
            .filter_map(|id| self.items.get(id.as_str()))
            .flatten()
            .filter(|item| !query.active_only || item.status == ItemStatus::Active)
            .filter(|item| query.pattern.as_ref().is_none_or(|p| p.matches(item)))
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(matching)
    }
}

#[async_trait]
impl HistorySource for FakeZabbix {
    async fn get_history(&self, query: &HistoryQuery) -> CmdbResult<Vec<HistoryRecord>> {
        Ok(self
            .history
            .get(&query.item_id)
            .map(|records| records.iter().take(query.limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl InterfaceSource for FakeZabbix {
    async fn get_interfaces(&self, host_ids: &[HostId]) -> CmdbResult<Vec<HostInterface>> {
        self.interface_calls.fetch_add(1, Ordering::SeqCst);
        Ok(host_ids
            .iter()
            .filter_map(|id| self.interfaces.get(id.as_str()))
            .flatten()
            .cloned()
            .collect())
    }
}

/// An empty report row for `host_id`.
pub(crate) fn report(host_id: &str) -> HostReport {
    HostReport {
        host_id: HostId::new_unchecked(host_id),
        host: format!("host-{host_id}"),
        name: format!("Host {host_id}"),
        availability: HostAvailability::Unknown,
        cpu_total: None,
        cpu_usage: None,
        memory_total: None,
        memory_usage: None,
        storage_total: None,
        disk_usage: Vec::new(),
        kernel_version: None,
        system_name: None,
        operating_system: None,
        os_architecture: None,
        customer: None,
        product: None,
        cpu_count: None,
        memory_bytes: None,
        storage_bytes: None,
    }
}

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub(crate) struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub(crate) fn contents(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut inner) = self.0.lock() {
            inner.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Routes this thread's logs into a buffer until the guard drops.
pub(crate) fn capture_logs() -> (DefaultGuard, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    (tracing::subscriber::set_default(subscriber), buffer)
}
