use crate::core::domain::error::{CmdbResult, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated Zabbix host identifier.
///
/// Zabbix sends identifiers as decimal strings (`"10084"`). A valid id is a
/// non-empty run of ASCII digits with a value greater than zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HostId(String);

impl HostId {
    /// Creates a validated host id.
    ///
    /// # Errors
    /// Returns `CmdbError::Validation` if the id is empty, not numeric or zero.
    pub fn new(value: impl Into<String>) -> CmdbResult<Self> {
        let value = value.into();
        validate_host_id(&value)?;
        Ok(Self(value))
    }

    /// Creates a host id without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HostId {
    type Err = crate::CmdbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for HostId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate_host_id(&value)?;
        Ok(Self(value))
    }
}

impl From<HostId> for String {
    fn from(id: HostId) -> Self {
        id.0
    }
}

/// Validates a host id string.
pub(crate) fn validate_host_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Field {
            field: "host_id".to_string(),
            message: "Host id cannot be empty".to_string(),
        });
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::Format(format!(
            "Host id must be numeric, got '{}'",
            value
        )));
    }
    if value.bytes().all(|b| b == b'0') {
        return Err(ValidationError::ConstraintViolation(
            "Host id must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
