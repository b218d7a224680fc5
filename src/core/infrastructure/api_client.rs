//! Internal JSON-RPC client for the Zabbix frontend API.

use crate::{
    ApiToken, ClientConfig, CmdbError, CmdbResult, ValidationError, ZabbixUrl,
};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

#[derive(Serialize)]
struct RpcRequest<'a, P> {
    jsonrpc: &'static str,
    method: &'a str,
    params: &'a P,
    id: u64,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: String,
}

/// Internal HTTP client that calls JSON-RPC methods on `api_jsonrpc.php`.
///
/// Every request carries `Authorization: Bearer <token>`. Transient failures
/// (connection errors, HTTP 5xx and 429) are retried up to
/// `ClientConfig::max_retries` times; JSON-RPC error objects are returned as
/// `CmdbError::Api` immediately.
#[derive(Debug)]
pub struct ApiClient {
    http_client: Client,
    url: ZabbixUrl,
    token: ApiToken,
    config: ClientConfig,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
    next_id: AtomicU64,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Errors
    /// Returns `CmdbError::Validation` for an invalid rate limit and
    /// `CmdbError::Connection` if the HTTP client cannot be built.
    pub fn new(url: ZabbixUrl, token: ApiToken, config: ClientConfig) -> CmdbResult<Self> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(config.timeout)
            .build()
            .map_err(|e| CmdbError::Connection(e.to_string()))?;

        let rate_limiter = match config.rate_limit {
            Some(rl) => {
                rl.validate()?;
                let per_second = NonZeroU32::new(rl.requests_per_second).ok_or_else(|| {
                    ValidationError::ConstraintViolation("Invalid rate limit".to_string())
                })?;
                let burst = NonZeroU32::new(rl.burst_size).ok_or_else(|| {
                    ValidationError::ConstraintViolation("Invalid burst size".to_string())
                })?;
                let quota = Quota::per_second(per_second).allow_burst(burst);
                Some(Arc::new(DefaultDirectRateLimiter::direct(quota)))
            }
            None => None,
        };

        Ok(Self {
            http_client,
            url,
            token,
            config,
            rate_limiter,
            next_id: AtomicU64::new(1),
        })
    }

    /// Returns the endpoint this client talks to.
    pub fn url(&self) -> &ZabbixUrl {
        &self.url
    }

    /// Calls a JSON-RPC method and decodes its `result`.
    ///
    /// # Errors
    /// Returns `CmdbError::Api` for JSON-RPC errors, `CmdbError::Http` for
    /// non-success statuses, `CmdbError::Connection` for transport failures
    /// and `CmdbError::Decode` for unexpected payloads.
    pub async fn call<P, T>(&self, method: &str, params: &P) -> CmdbResult<T>
    where
        P: Serialize + Sync,
        T: DeserializeOwned,
    {
        let mut attempt = 0;
        loop {
            match self.send_once(method, params).await {
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(method, attempt, error = %e, "retrying transient API failure");
                }
                result => return result,
            }
        }
    }

    async fn send_once<P, T>(&self, method: &str, params: &P) -> CmdbResult<T>
    where
        P: Serialize + Sync,
        T: DeserializeOwned,
    {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };
        debug!(method, id, "sending API request");

        let response = self
            .http_client
            .post(self.url.as_str())
            .bearer_auth(self.token.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| CmdbError::Connection(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(CmdbError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let envelope = response
            .json::<RpcResponse<T>>()
            .await
            .map_err(|e| CmdbError::Decode(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = envelope.error {
            return Err(CmdbError::Api {
                code: error.code,
                message: error.message,
                data: error.data,
            });
        }

        envelope
            .result
            .ok_or_else(|| CmdbError::Decode(format!("Response to '{}' has no result", method)))
    }
}
