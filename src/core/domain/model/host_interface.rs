//! Domain models for host interfaces from `hostinterface.get`.

use crate::core::domain::value_object::serde_helpers;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of interface a host is reached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterfaceType {
    #[default]
    Agent,
    Snmp,
    Ipmi,
    Jmx,
    Other(u8),
}

impl From<u8> for InterfaceType {
    fn from(code: u8) -> Self {
        match code {
            1 => InterfaceType::Agent,
            2 => InterfaceType::Snmp,
            3 => InterfaceType::Ipmi,
            4 => InterfaceType::Jmx,
            other => InterfaceType::Other(other),
        }
    }
}

impl From<InterfaceType> for u8 {
    fn from(kind: InterfaceType) -> Self {
        match kind {
            InterfaceType::Agent => 1,
            InterfaceType::Snmp => 2,
            InterfaceType::Ipmi => 3,
            InterfaceType::Jmx => 4,
            InterfaceType::Other(code) => code,
        }
    }
}

/// A network interface of a host.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HostInterface {
    /// Interface identifier.
    #[serde(
        rename = "interfaceid",
        default,
        deserialize_with = "serde_helpers::stringly"
    )]
    pub interface_id: String,
    /// Interface kind.
    #[serde(rename = "type", default, with = "serde_helpers::code")]
    pub interface_type: InterfaceType,
    /// Whether this is the host's main interface of its kind.
    #[serde(default, with = "serde_helpers::flag")]
    pub main: bool,
    /// Raw availability code: `0` unknown, `1` available, `2` unavailable.
    #[serde(default, with = "serde_helpers::code")]
    pub available: u8,
    /// IP address (may be empty when DNS is used).
    #[serde(default)]
    pub ip: String,
    /// DNS name (may be empty).
    #[serde(default)]
    pub dns: String,
    /// Last availability error reported by the server.
    #[serde(default)]
    pub error: String,
}

impl HostInterface {
    /// Maps the raw availability code.
    #[must_use]
    pub fn availability(&self) -> HostAvailability {
        HostAvailability::from_code(self.available)
    }
}

/// Availability of a host, projected from its primary interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostAvailability {
    Available,
    Unavailable,
    #[default]
    Unknown,
}

impl HostAvailability {
    /// Maps an interface availability code; anything but `1`/`2` is unknown.
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => HostAvailability::Available,
            2 => HostAvailability::Unavailable,
            _ => HostAvailability::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HostAvailability::Available => "available",
            HostAvailability::Unavailable => "unavailable",
            HostAvailability::Unknown => "unknown",
        }
    }

    /// Human readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            HostAvailability::Available => "Available",
            HostAvailability::Unavailable => "Unavailable",
            HostAvailability::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for HostAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
