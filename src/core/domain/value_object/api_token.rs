use crate::core::domain::error::{CmdbResult, ValidationError};
use std::fmt;

/// A Zabbix API token (or session id) sent as `Authorization: Bearer`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Creates a validated token.
    ///
    /// # Errors
    /// Returns `CmdbError::Validation` if the token is empty or contains
    /// characters that cannot appear in an HTTP header value.
    pub fn new(value: impl Into<String>) -> CmdbResult<Self> {
        let value = value.into();
        validate_api_token(&value)?;
        Ok(Self(value))
    }

    /// Creates a token without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the secret itself.
impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&"***").finish()
    }
}

/// Validates the format of a token string.
pub(crate) fn validate_api_token(token: &str) -> Result<(), ValidationError> {
    if token.is_empty() {
        return Err(ValidationError::Field {
            field: "api_token".to_string(),
            message: "API token cannot be empty".to_string(),
        });
    }
    if !token.chars().all(|c| c.is_ascii_graphic()) {
        return Err(ValidationError::Format(
            "API token must only contain visible ASCII characters".to_string(),
        ));
    }
    Ok(())
}
