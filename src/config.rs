//! Client and finder configuration.

use crate::core::domain::error::ValidationError;
use std::time::Duration;

/// Token bucket applied to every API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.requests_per_second == 0 {
            return Err(ValidationError::Field {
                field: "requests_per_second".to_string(),
                message: "Rate limit must allow at least one request per second".to_string(),
            });
        }
        if self.burst_size == 0 {
            return Err(ValidationError::Field {
                field: "burst_size".to_string(),
                message: "Burst size cannot be 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Settings of the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Optional request rate limit; `None` disables limiting.
    pub rate_limit: Option<RateLimitConfig>,
    /// Extra attempts for transient failures (connection errors, 5xx, 429).
    pub max_retries: u32,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Accept self-signed certificates.
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rate_limit: None,
            max_retries: 1,
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

/// Settings of the item finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinderConfig {
    /// Hosts resolved concurrently by `host_reports`.
    pub concurrency: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}
