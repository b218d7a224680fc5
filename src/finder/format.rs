//! Display formatting for resolved values.
//!
//! All functions here are pure; a `"-"` placeholder stands for values that
//! cannot be shown.

use crate::core::domain::model::FilesystemMetric;
use regex::Regex;
use std::sync::LazyLock;

/// Placeholder for missing or unusable values.
pub const PLACEHOLDER: &str = "-";

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const KERNEL_MAX_LEN: usize = 50;
const KERNEL_TRUNCATED_LEN: usize = 47;

static LINUX_UNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Linux\s+\S+\s+(\S+)").expect("uname pattern is valid"));

static WINDOWS_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Windows\s+[^0-9]*([0-9]+[^,\s]*)").expect("windows pattern is valid")
});

/// Rounds to two decimal places, half away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parses a finite number, ignoring surrounding whitespace.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Prints a number rounded to two decimals without trailing zeros
/// (`1.50` -> `1.5`, `1.00` -> `1`).
pub fn format_number(value: f64) -> String {
    let printed = format!("{:.2}", round2(value));
    let trimmed = printed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Formats a byte count with the largest unit keeping the value below 1024.
///
/// Non-finite, zero and negative inputs yield `"-"`.
pub fn format_bytes(bytes: f64) -> String {
    if !bytes.is_finite() || bytes <= 0.0 {
        return PLACEHOLDER.to_string();
    }

    let mut scaled = bytes;
    let mut power = 0;
    while scaled >= 1024.0 && power < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        power += 1;
    }

    format!("{} {}", format_number(scaled), SIZE_UNITS[power])
}

/// Formats a raw item value holding a byte count.
///
/// # Examples
///
/// ```
/// use zabbix_cmdb::finder::format::format_memory_size;
///
/// assert_eq!(format_memory_size("1536"), "1.5 KB");
/// assert_eq!(format_memory_size("abc"), "-");
/// ```
pub fn format_memory_size(raw: &str) -> String {
    match parse_number(raw) {
        Some(bytes) => format_bytes(bytes),
        None => PLACEHOLDER.to_string(),
    }
}

/// Shortens a raw `uname`/OS description to its version token.
///
/// Strings of up to 50 characters are returned unchanged. Longer ones yield
/// the Linux kernel release, `"Windows <version>"`, or the first 47
/// characters followed by `...`.
pub fn extract_kernel_info(raw: &str) -> String {
    if raw.is_empty() {
        return PLACEHOLDER.to_string();
    }
    if raw.chars().count() <= KERNEL_MAX_LEN {
        return raw.to_string();
    }

    if let Some(release) = LINUX_UNAME.captures(raw).and_then(|c| c.get(1)) {
        return release.as_str().to_string();
    }
    if let Some(version) = WINDOWS_VERSION.captures(raw).and_then(|c| c.get(1)) {
        return format!("Windows {}", version.as_str());
    }

    let head: String = raw.chars().take(KERNEL_TRUNCATED_LEN).collect();
    format!("{}...", head)
}

/// Formats a raw percentage value (`"12.3456"` -> `"12.35%"`).
///
/// Returns `None` for non-numeric input.
pub fn format_percentage(raw: &str) -> Option<String> {
    parse_number(raw).map(|v| format!("{}%", format_number(v)))
}

/// One `"<mount>: <pct>%"` line per filesystem.
pub fn format_disk_usage(usage: &[FilesystemMetric]) -> String {
    if usage.is_empty() {
        return PLACEHOLDER.to_string();
    }
    usage
        .iter()
        .map(|fs| format!("{}: {}%", fs.mount, format_number(fs.percentage_used)))
        .collect::<Vec<_>>()
        .join("\n")
}
