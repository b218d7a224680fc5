//! Filesystem discovery and storage rollup.
//!
//! Filesystem items follow the `vfs.fs.size[<mount>,<mode>]` key structure,
//! where `<mode>` is one of `total`, `used`, `free`, `pused` or `pfree`.

use crate::{
    core::domain::{
        error::CmdbResult,
        model::{FilesystemMetric, FsMetricKind, MonitoringItem, SearchPattern},
        source::ItemQuery,
        value_object::HostId,
    },
    finder::{format::round2, item_finder::ItemFinder},
};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

const FS_KEY_FAMILY: &str = "vfs.fs.size";

static FS_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"vfs\.fs\.size\[([^,\]]+),\s*(pused|pfree|total|used|free)\]")
        .expect("filesystem key pattern is valid")
});

static DRIVE_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]:$").expect("drive letter pattern is valid"));

/// Parses a filesystem size key into its raw mount token and measurement.
///
/// The mount is trimmed but keeps its quotes; keys outside the family or with
/// an unknown mode yield `None`.
pub fn parse_fs_key(key: &str) -> Option<(&str, FsMetricKind)> {
    if !key.contains(FS_KEY_FAMILY) {
        return None;
    }
    let captures = FS_KEY.captures(key)?;
    let mount = captures.get(1)?.as_str().trim();
    let kind = captures.get(2)?.as_str().parse().ok()?;
    Some((mount, kind))
}

/// `true` for mounts that are still low-level discovery or user macros.
pub fn is_templated_mount(mount: &str) -> bool {
    mount.contains("{#") || mount.contains('$')
}

fn strip_quotes(mount: &str) -> String {
    mount.replace('"', "")
}

fn parse_reading(value: Option<&str>) -> Option<f64> {
    value
        .filter(|v| !v.is_empty())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Sum of every distinct mount's first positive `total` reading.
///
/// Returns `None` when nothing was summed.
pub fn storage_total_from_items(items: &[MonitoringItem]) -> Option<f64> {
    let mut counted: HashSet<String> = HashSet::new();
    let mut total = 0.0;

    for item in items {
        let Some((raw_mount, FsMetricKind::Total)) = parse_fs_key(&item.key) else {
            continue;
        };
        let mount = strip_quotes(raw_mount);
        if is_templated_mount(&mount) || counted.contains(&mount) {
            continue;
        }
        if let Some(value) = parse_reading(item.last_value.as_deref()).filter(|v| *v > 0.0) {
            total += value;
            counted.insert(mount);
        }
    }

    (total > 0.0).then_some(total)
}

#[derive(Debug, Default)]
struct MountReadings {
    total: Option<f64>,
    used: Option<f64>,
    free: Option<f64>,
    pused: Option<f64>,
    pfree: Option<f64>,
}

impl MountReadings {
    fn record(&mut self, kind: FsMetricKind, value: f64) {
        let slot = match kind {
            FsMetricKind::Total => &mut self.total,
            FsMetricKind::Used => &mut self.used,
            FsMetricKind::Free => &mut self.free,
            FsMetricKind::Pused => &mut self.pused,
            FsMetricKind::Pfree => &mut self.pfree,
        };
        *slot = Some(value);
    }

    /// `pused`, then `100 - pfree`, then `used / total`, then
    /// `(total - free) / total`. The first available reading wins.
    fn percentage_used(&self) -> Option<f64> {
        if let Some(pused) = self.pused {
            return Some(pused);
        }
        if let Some(pfree) = self.pfree {
            return Some(100.0 - pfree);
        }
        match (self.total, self.used, self.free) {
            (Some(total), Some(used), _) => (total > 0.0).then(|| used / total * 100.0),
            (Some(total), None, Some(free)) => {
                (total > 0.0).then(|| (total - free) / total * 100.0)
            }
            _ => None,
        }
    }
}

/// Orders drive letters first, then `/`, then the remaining mounts
/// lexicographically.
pub fn compare_mounts(a: &str, b: &str) -> Ordering {
    let a_drive = DRIVE_LETTER.is_match(a);
    let b_drive = DRIVE_LETTER.is_match(b);
    b_drive
        .cmp(&a_drive)
        .then_with(|| (b == "/").cmp(&(a == "/")))
        .then_with(|| a.cmp(b))
}

/// Per-mount disk usage derived from already fetched items.
///
/// Returns `None` when no mount has a derivable percentage.
pub fn disk_usage_from_items(items: &[MonitoringItem]) -> Option<Vec<FilesystemMetric>> {
    let mut mounts: BTreeMap<String, MountReadings> = BTreeMap::new();

    for item in items {
        let Some((raw_mount, kind)) = parse_fs_key(&item.key) else {
            continue;
        };
        if is_templated_mount(raw_mount) {
            continue;
        }
        let readings = mounts.entry(strip_quotes(raw_mount)).or_default();
        if let Some(value) = parse_reading(item.last_value.as_deref()) {
            readings.record(kind, value);
        }
    }

    let mut usage: Vec<FilesystemMetric> = mounts
        .into_iter()
        .filter_map(|(mount, readings)| {
            let percentage = readings.percentage_used()?;
            Some(FilesystemMetric {
                mount,
                percentage_used: round2(percentage),
                total_size_bytes: readings.total,
            })
        })
        .collect();

    usage.sort_by(|a, b| compare_mounts(&a.mount, &b.mount));
    (!usage.is_empty()).then_some(usage)
}

impl ItemFinder {
    async fn filesystem_items(&self, host_id: &HostId) -> CmdbResult<Vec<MonitoringItem>> {
        let query =
            ItemQuery::for_host(host_id).with_pattern(SearchPattern::key_contains(FS_KEY_FAMILY));
        self.items.get_items(&query).await
    }

    /// Total storage of a host in bytes.
    ///
    /// # Errors
    ///
    /// Item source failures are returned as `CmdbError::Metric` for
    /// `storage_total`.
    pub async fn find_storage_total(&self, host_id: &HostId) -> CmdbResult<Option<f64>> {
        let items = self
            .filesystem_items(host_id)
            .await
            .map_err(|e| e.for_metric(host_id, "storage_total"))?;
        Ok(storage_total_from_items(&items))
    }

    /// Usage of every filesystem of a host, drive letters first.
    ///
    /// # Errors
    ///
    /// Item source failures are returned as `CmdbError::Metric` for
    /// `disk_usage`.
    pub async fn find_disk_usage(
        &self,
        host_id: &HostId,
    ) -> CmdbResult<Option<Vec<FilesystemMetric>>> {
        let items = self
            .filesystem_items(host_id)
            .await
            .map_err(|e| e.for_metric(host_id, "disk_usage"))?;
        Ok(disk_usage_from_items(&items))
    }
}
