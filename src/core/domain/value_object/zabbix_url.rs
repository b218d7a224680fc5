use crate::core::domain::error::{CmdbResult, ValidationError};
use std::collections::HashSet;
use url::Url;

const ENDPOINT: &str = "api_jsonrpc.php";

/// Represents the configuration for a Zabbix URL value object
///
/// This configuration object encapsulates the constraints and settings
/// for URL validation according to:
/// - RFC 3986 (URI Generic Syntax)
/// - RFC 7230 (HTTP/1.1 Message Syntax and Routing)
#[derive(Debug, Clone)]
pub struct ZabbixUrlConfig {
    allowed_schemes: HashSet<String>,
    max_length: usize,
}

impl ZabbixUrlConfig {
    fn validate_url(&self, url: &str) -> Result<Url, ValidationError> {
        if url.is_empty() {
            return Err(ValidationError::Field {
                field: "url".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        }

        if url.len() > self.max_length {
            return Err(ValidationError::Format(format!(
                "URL exceeds maximum length of {} characters",
                self.max_length
            )));
        }

        let parsed = Url::parse(url)
            .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;

        if !self.allowed_schemes.contains(parsed.scheme()) {
            let mut schemes: Vec<&str> = self.allowed_schemes.iter().map(String::as_str).collect();
            schemes.sort_unstable();
            return Err(ValidationError::ConstraintViolation(format!(
                "Invalid scheme. Must be one of: {}",
                schemes.join(", ")
            )));
        }

        if parsed.host_str().is_none() {
            return Err(ValidationError::Format("URL must contain a host".to_string()));
        }

        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ValidationError::ConstraintViolation(
                "URL must not contain a query or fragment".to_string(),
            ));
        }

        Ok(parsed)
    }
}

impl Default for ZabbixUrlConfig {
    fn default() -> Self {
        let mut schemes = HashSet::new();
        schemes.insert("https".to_string());
        schemes.insert("http".to_string());

        Self {
            allowed_schemes: schemes,
            max_length: 2083, // RFC 7230 standard
        }
    }
}

/// Represents a validated Zabbix JSON-RPC endpoint
///
/// Accepts either the frontend base URL (`https://zabbix.example.com/zabbix`)
/// or the full endpoint; both resolve to `<base>/api_jsonrpc.php`.
///
/// # Examples
///
/// ```
/// use zabbix_cmdb::ZabbixUrl;
///
/// let url = ZabbixUrl::new("https://zabbix.example.com/zabbix").unwrap();
/// assert_eq!(url.as_str(), "https://zabbix.example.com/zabbix/api_jsonrpc.php");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZabbixUrl {
    endpoint: Url,
}

impl ZabbixUrl {
    /// Creates a validated endpoint URL.
    ///
    /// # Errors
    /// Returns `CmdbError::Validation` if the URL is malformed, uses a scheme
    /// other than http/https or carries a query string.
    pub fn new(value: impl AsRef<str>) -> CmdbResult<Self> {
        let parsed = ZabbixUrlConfig::default().validate_url(value.as_ref().trim())?;
        Ok(Self {
            endpoint: Self::resolve_endpoint(parsed)?,
        })
    }

    fn resolve_endpoint(mut base: Url) -> Result<Url, ValidationError> {
        if base.path().ends_with(ENDPOINT) {
            return Ok(base);
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(ENDPOINT)
            .map_err(|e| ValidationError::Format(format!("Invalid API path: {}", e)))
    }

    /// Returns the endpoint as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Returns the parsed endpoint.
    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.endpoint
    }
}
