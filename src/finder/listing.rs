//! Row selection and ordering for inventory listings.

use crate::{
    core::domain::model::InterfaceType,
    finder::{
        format::parse_number,
        report::{HostRef, HostReport},
    },
};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Selects which hosts are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostFilter {
    /// Keep only hosts with at least one interface of this type.
    pub interface_type: Option<InterfaceType>,
    /// Drop web-check pseudo hosts (visible name containing `URL`).
    pub exclude_url_checks: bool,
}

impl HostFilter {
    pub fn with_interface_type(mut self, interface_type: InterfaceType) -> Self {
        self.interface_type = Some(interface_type);
        self
    }

    pub fn excluding_url_checks(mut self) -> Self {
        self.exclude_url_checks = true;
        self
    }

    /// `true` if `host` passes the filter.
    ///
    /// Hosts without known interfaces never match an interface type.
    pub fn accepts(&self, host: &HostRef) -> bool {
        if let Some(wanted) = self.interface_type {
            let has_type = host
                .interfaces
                .as_deref()
                .unwrap_or_default()
                .iter()
                .any(|iface| iface.interface_type == wanted);
            if !has_type {
                return false;
            }
        }
        !(self.exclude_url_checks && host.name.to_uppercase().contains("URL"))
    }

    /// Keeps the accepted hosts, in order.
    pub fn apply(&self, hosts: Vec<HostRef>) -> Vec<HostRef> {
        hosts.into_iter().filter(|h| self.accepts(h)).collect()
    }
}

/// A report column rows can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    Host,
    Name,
    #[default]
    CpuTotal,
    CpuUsage,
    MemoryTotal,
    MemoryUsage,
    StorageTotal,
    KernelVersion,
    SystemName,
    OperatingSystem,
    OsArchitecture,
    Customer,
    Product,
    Availability,
}

impl SortField {
    pub const ALL: [SortField; 14] = [
        SortField::Host,
        SortField::Name,
        SortField::CpuTotal,
        SortField::CpuUsage,
        SortField::MemoryTotal,
        SortField::MemoryUsage,
        SortField::StorageTotal,
        SortField::KernelVersion,
        SortField::SystemName,
        SortField::OperatingSystem,
        SortField::OsArchitecture,
        SortField::Customer,
        SortField::Product,
        SortField::Availability,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortField::Host => "host",
            SortField::Name => "name",
            SortField::CpuTotal => "cpu_total",
            SortField::CpuUsage => "cpu_usage",
            SortField::MemoryTotal => "memory_total",
            SortField::MemoryUsage => "memory_usage",
            SortField::StorageTotal => "storage_total",
            SortField::KernelVersion => "kernel_version",
            SortField::SystemName => "system_name",
            SortField::OperatingSystem => "operating_system",
            SortField::OsArchitecture => "os_architecture",
            SortField::Customer => "customer",
            SortField::Product => "product",
            SortField::Availability => "availability",
        }
    }

    fn key(self, report: &HostReport) -> SortKey<'_> {
        let text = |v: &Option<String>| SortKey::Text(v.as_deref().unwrap_or("-").to_string());
        let bytes = |v: Option<i64>| SortKey::Number(v.map_or(0.0, |b| b as f64));
        match self {
            SortField::Host => SortKey::Borrowed(&report.host),
            SortField::Name => SortKey::Borrowed(&report.name),
            SortField::CpuTotal => SortKey::Number(numeric(report.cpu_total.as_deref())),
            SortField::CpuUsage => SortKey::Number(percentage(report.cpu_usage.as_deref())),
            SortField::MemoryTotal => bytes(report.memory_bytes),
            SortField::MemoryUsage => SortKey::Number(percentage(report.memory_usage.as_deref())),
            SortField::StorageTotal => bytes(report.storage_bytes),
            SortField::KernelVersion => text(&report.kernel_version),
            SortField::SystemName => text(&report.system_name),
            SortField::OperatingSystem => text(&report.operating_system),
            SortField::OsArchitecture => text(&report.os_architecture),
            SortField::Customer => text(&report.customer),
            SortField::Product => text(&report.product),
            SortField::Availability => SortKey::Borrowed(report.availability.as_str()),
        }
    }
}

impl FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or(())
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            _ => Err(()),
        }
    }
}

enum SortKey<'a> {
    Number(f64),
    Text(String),
    Borrowed(&'a str),
}

impl SortKey<'_> {
    fn as_text(&self) -> &str {
        match self {
            SortKey::Text(s) => s,
            SortKey::Borrowed(s) => s,
            SortKey::Number(_) => "",
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            _ => self.as_text().cmp(other.as_text()),
        }
    }
}

/// Missing and non-numeric values count as 0.
fn numeric(raw: Option<&str>) -> f64 {
    raw.and_then(parse_number).unwrap_or(0.0)
}

fn percentage(raw: Option<&str>) -> f64 {
    numeric(raw.map(|v| v.trim_end_matches('%')))
}

/// Stable sort of report rows by one column.
pub fn sort_reports(reports: &mut [HostReport], field: SortField, order: SortOrder) {
    reports.sort_by(|a, b| {
        let ordering = field.key(a).compare(&field.key(b));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
