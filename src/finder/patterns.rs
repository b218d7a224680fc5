//! Static search tables, one per metric.
//!
//! Each table lists exact keys first, then name substrings, then key
//! substrings. Order is significant: the first pattern that yields an item
//! wins.

use crate::core::domain::model::SearchPattern;
use std::fmt;

/// A semantic host metric the finder can resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    CpuCount,
    CpuUsage,
    MemoryTotal,
    MemoryUsage,
    KernelVersion,
    SystemName,
    OperatingSystem,
    OsArchitecture,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::CpuCount,
        Metric::CpuUsage,
        Metric::MemoryTotal,
        Metric::MemoryUsage,
        Metric::KernelVersion,
        Metric::SystemName,
        Metric::OperatingSystem,
        Metric::OsArchitecture,
    ];

    /// Returns the ordered search table of the metric.
    #[must_use]
    pub fn patterns(self) -> &'static [SearchPattern] {
        match self {
            Metric::CpuCount => &CPU_COUNT,
            Metric::CpuUsage => &CPU_USAGE,
            Metric::MemoryTotal => &MEMORY_TOTAL,
            Metric::MemoryUsage => &MEMORY_USAGE,
            Metric::KernelVersion => &KERNEL_VERSION,
            Metric::SystemName => &SYSTEM_NAME,
            Metric::OperatingSystem => &OPERATING_SYSTEM,
            Metric::OsArchitecture => &OS_ARCHITECTURE,
        }
    }

    /// Stable snake_case name used in logs and errors.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Metric::CpuCount => "cpu_count",
            Metric::CpuUsage => "cpu_usage",
            Metric::MemoryTotal => "memory_total",
            Metric::MemoryUsage => "memory_usage",
            Metric::KernelVersion => "kernel_version",
            Metric::SystemName => "system_name",
            Metric::OperatingSystem => "operating_system",
            Metric::OsArchitecture => "os_architecture",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static CPU_COUNT: [SearchPattern; 6] = [
    SearchPattern::exact_key("system.cpu.num"),
    SearchPattern::exact_key("system.hw.cpu.num"),
    SearchPattern::name_contains("Number of CPUs"),
    SearchPattern::name_contains("Number of cores"),
    SearchPattern::name_contains("CPU cores"),
    SearchPattern::key_contains("cpu.num"),
];

static MEMORY_TOTAL: [SearchPattern; 5] = [
    SearchPattern::exact_key("vm.memory.size[total]"),
    SearchPattern::exact_key("vm.memory.total"),
    SearchPattern::name_contains("Total memory"),
    SearchPattern::name_contains("Memory total"),
    SearchPattern::key_contains("vm.memory.size"),
];

static CPU_USAGE: [SearchPattern; 10] = [
    SearchPattern::exact_key("system.cpu.util[,avg1]"),
    SearchPattern::exact_key("system.cpu.util[]"),
    SearchPattern::exact_key("system.cpu.util"),
    SearchPattern::exact_key("system.cpu.load[avg1]"),
    SearchPattern::name_contains("CPU utilization"),
    SearchPattern::name_contains("CPU Utilization"),
    SearchPattern::name_contains("CPU usage"),
    SearchPattern::name_contains("Processor load"),
    SearchPattern::key_contains("cpu.util"),
    SearchPattern::key_contains("cpu.load"),
];

static MEMORY_USAGE: [SearchPattern; 10] = [
    SearchPattern::exact_key("vm.memory.util[]"),
    SearchPattern::exact_key("vm.memory.util"),
    SearchPattern::exact_key("vm.memory.pused"),
    SearchPattern::exact_key("vm.memory.utilization"),
    SearchPattern::name_contains("Memory utilization"),
    SearchPattern::name_contains("Memory Utilization"),
    SearchPattern::name_contains("Memory usage"),
    SearchPattern::name_contains("Used memory"),
    SearchPattern::key_contains("memory.util"),
    SearchPattern::key_contains("memory.pused"),
];

static KERNEL_VERSION: [SearchPattern; 5] = [
    SearchPattern::exact_key("system.uname"),
    SearchPattern::exact_key("system.sw.os[uname]"),
    SearchPattern::name_contains("System uname"),
    SearchPattern::name_contains("Kernel version"),
    SearchPattern::key_contains("system.uname"),
];

static SYSTEM_NAME: [SearchPattern; 5] = [
    SearchPattern::exact_key("system.hostname"),
    SearchPattern::exact_key("system.sw.os[hostname]"),
    SearchPattern::name_contains("System name"),
    SearchPattern::name_contains("Hostname"),
    SearchPattern::key_contains("system.hostname"),
];

static OPERATING_SYSTEM: [SearchPattern; 5] = [
    SearchPattern::exact_key("system.sw.os"),
    SearchPattern::exact_key("system.sw.os[name]"),
    SearchPattern::name_contains("Operating system"),
    SearchPattern::name_contains("OS name"),
    SearchPattern::key_contains("system.sw.os"),
];

static OS_ARCHITECTURE: [SearchPattern; 5] = [
    SearchPattern::exact_key("system.sw.arch"),
    SearchPattern::exact_key("system.hw.arch"),
    SearchPattern::name_contains("Operating system architecture"),
    SearchPattern::name_contains("System architecture"),
    SearchPattern::key_contains("system.sw.arch"),
];
