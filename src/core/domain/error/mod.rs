use thiserror::Error;

/// The main error type for Zabbix CMDB operations.
///
/// This enum represents all possible errors that can occur while talking to
/// the Zabbix API and resolving host metrics, including transport,
/// JSON-RPC, validation and per-metric lookup failures.
#[derive(Error, Debug)]
pub enum CmdbError {
    /// Represents errors that occur while sending a request
    ///
    /// # Fields
    /// * `0` - A description of what went wrong during the request
    #[error("Connection error: {0}")]
    Connection(String),

    /// Represents a non-success HTTP status returned by the frontend
    ///
    /// # Fields
    /// * `status` - The HTTP status code
    /// * `body` - The response body, if it could be read
    #[error("HTTP error ({status}): {body}")]
    Http { status: u16, body: String },

    /// Represents a response that could not be decoded
    ///
    /// # Fields
    /// * `0` - A description of the decoding failure
    #[error("Decode error: {0}")]
    Decode(String),

    /// Represents an error object returned by the JSON-RPC endpoint
    ///
    /// # Fields
    /// * `code` - The JSON-RPC error code (e.g. `-32602`)
    /// * `message` - The short error message
    /// * `data` - Additional detail supplied by Zabbix
    #[error("API error {code}: {message} {data}")]
    Api {
        code: i64,
        message: String,
        data: String,
    },

    /// Represents validation failures with detailed context
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A metric lookup failed for a specific host
    ///
    /// # Fields
    /// * `host_id` - The host the lookup was run for
    /// * `metric` - The metric name (e.g. `cpu_count`)
    /// * `source` - The underlying collaborator error
    #[error("Lookup of '{metric}' failed for host {host_id}: {source}")]
    Metric {
        host_id: String,
        metric: &'static str,
        #[source]
        source: Box<CmdbError>,
    },
}

impl CmdbError {
    /// Returns `true` for failures worth retrying: transport errors,
    /// HTTP 5xx and 429.
    pub fn is_transient(&self) -> bool {
        match self {
            CmdbError::Connection(_) => true,
            CmdbError::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Attaches host and metric context to a collaborator error.
    pub(crate) fn for_metric(self, host_id: impl ToString, metric: &'static str) -> Self {
        CmdbError::Metric {
            host_id: host_id.to_string(),
            metric,
            source: Box::new(self),
        }
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Type alias for Results that may fail with a CmdbError
pub type CmdbResult<T> = Result<T, CmdbError>;
