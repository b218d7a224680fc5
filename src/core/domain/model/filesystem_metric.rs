//! Domain models for filesystem size items (`vfs.fs.size[<mount>,<mode>]`).

use serde::Serialize;
use std::str::FromStr;

/// The measurement carried by a filesystem size item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsMetricKind {
    Total,
    Used,
    Free,
    Pused,
    Pfree,
}

impl FromStr for FsMetricKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "total" => Ok(FsMetricKind::Total),
            "used" => Ok(FsMetricKind::Used),
            "free" => Ok(FsMetricKind::Free),
            "pused" => Ok(FsMetricKind::Pused),
            "pfree" => Ok(FsMetricKind::Pfree),
            _ => Err(()),
        }
    }
}

/// Usage of one filesystem on a host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilesystemMetric {
    /// Mount point (e.g. `/`, `C:`).
    pub mount: String,
    /// Used space in percent, rounded to 2 decimals.
    pub percentage_used: f64,
    /// Filesystem size in bytes, when a `total` reading exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_size_bytes: Option<f64>,
}
