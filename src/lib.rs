//! Inventory resolution for hosts monitored by Zabbix.
//!
//! Templates name the same measurement differently (`system.cpu.num`,
//! `"Number of CPUs"`, ...). The [`ItemFinder`] walks an ordered table of
//! patterns per metric and resolves the first matching item's value, falling
//! back to history when the item has no last value.

pub mod config;
pub mod core;
pub mod finder;

#[cfg(test)]
mod tests;

pub use crate::{
    config::{ClientConfig, FinderConfig, RateLimitConfig},
    core::domain::{
        error::{CmdbError, CmdbResult, ValidationError},
        model::{
            FilesystemMetric, HostAvailability, HostInterface, InterfaceType, MonitoringItem,
            ResolvedValue, SearchPattern,
        },
        value_object::{ApiToken, HostId, ZabbixUrl},
    },
    finder::{
        HostFilter, HostRef, HostReport, InventoryTotals, ItemFinder, Metric, SortField, SortOrder,
        sort_reports,
    },
};

use crate::core::infrastructure::{api_client::ApiClient, zabbix_api::ZabbixApi};
use std::{sync::Arc, time::Duration};

/// A Zabbix client wired to an [`ItemFinder`].
///
/// # Examples
///
/// ```no_run
/// use zabbix_cmdb::{CmdbClient, CmdbResult, HostId};
///
/// #[tokio::main]
/// async fn main() -> CmdbResult<()> {
///     let client = CmdbClient::builder()
///         .url("https://zabbix.example.com")?
///         .api_token("4b1e1a0f...")?
///         .max_retries(2)
///         .build()?;
///
///     let host = HostId::new("10084")?;
///     let cpus = client.finder().find_cpu_count(&host).await?;
///     println!("{:?}", cpus.and_then(|c| c.value));
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CmdbClient {
    api: Arc<ZabbixApi>,
    finder: ItemFinder,
}

/// Builder for CmdbClient configuration
#[derive(Debug, Default)]
pub struct CmdbClientBuilder {
    url: Option<ZabbixUrl>,
    token: Option<ApiToken>,
    client: ClientConfig,
    finder: FinderConfig,
}

impl CmdbClientBuilder {
    /// Sets the frontend URL, e.g. `https://zabbix.example.com/zabbix`.
    pub fn url(mut self, url: impl AsRef<str>) -> CmdbResult<Self> {
        self.url = Some(ZabbixUrl::new(url)?);
        Ok(self)
    }

    pub fn api_token(mut self, token: impl Into<String>) -> CmdbResult<Self> {
        self.token = Some(ApiToken::new(token)?);
        Ok(self)
    }

    pub fn rate_limit(mut self, requests_per_second: u32, burst_size: u32) -> Self {
        self.client.rate_limit = Some(RateLimitConfig {
            requests_per_second,
            burst_size,
        });
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.client.max_retries = max_retries;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.client.timeout = timeout;
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.client.accept_invalid_certs = accept;
        self
    }

    /// Hosts resolved at once by [`ItemFinder::host_reports`].
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.finder.concurrency = concurrency;
        self
    }

    pub fn build(self) -> CmdbResult<CmdbClient> {
        let url = self.url.ok_or_else(|| ValidationError::Field {
            field: "url".to_string(),
            message: "URL is required".to_string(),
        })?;
        let token = self.token.ok_or_else(|| ValidationError::Field {
            field: "api_token".to_string(),
            message: "API token is required".to_string(),
        })?;

        let client = ApiClient::new(url, token, self.client)?;
        let api = Arc::new(ZabbixApi::new(client));
        let finder = ItemFinder::new(api.clone()).with_config(self.finder);

        Ok(CmdbClient { api, finder })
    }
}

impl CmdbClient {
    /// Creates a new builder for CmdbClient configuration
    pub fn builder() -> CmdbClientBuilder {
        CmdbClientBuilder::default()
    }

    pub fn finder(&self) -> &ItemFinder {
        &self.finder
    }

    /// The underlying API, for listing glue that needs raw calls.
    pub fn api(&self) -> &ZabbixApi {
        &self.api
    }

    /// Builds inventory rows for `hosts`, in input order.
    pub async fn inventory(&self, hosts: &[HostRef]) -> (Vec<HostReport>, InventoryTotals) {
        let reports = self.finder.host_reports(hosts).await;
        let totals = InventoryTotals::from_reports(&reports);
        (reports, totals)
    }
}
