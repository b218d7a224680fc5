//! Live implementation of the collaborator traits over the Zabbix API.

use crate::core::{
    domain::{
        error::CmdbResult,
        model::{HistoryRecord, HostInterface, MonitoringItem, SearchPattern},
        source::{HistoryQuery, HistorySource, InterfaceSource, ItemQuery, ItemSource},
        value_object::HostId,
    },
    infrastructure::api_client::ApiClient,
};
use async_trait::async_trait;
use serde_json::{Map, Value, json};

const ITEM_OUTPUT: [&str; 7] = [
    "itemid",
    "name",
    "key_",
    "lastvalue",
    "lastclock",
    "value_type",
    "status",
];

const INTERFACE_OUTPUT: [&str; 7] = [
    "interfaceid",
    "type",
    "main",
    "available",
    "ip",
    "dns",
    "error",
];

/// Item, history and interface source backed by the JSON-RPC API.
#[derive(Debug)]
pub struct ZabbixApi {
    client: ApiClient,
}

impl ZabbixApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Returns the underlying JSON-RPC client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

/// Builds `item.get` parameters.
///
/// Exact keys go through `filter`; substring modes use a `*value*` wildcard
/// search so the match is a substring regardless of server defaults.
pub(crate) fn item_params(query: &ItemQuery) -> Value {
    let mut params = Map::new();
    params.insert("output".to_string(), json!(ITEM_OUTPUT));
    params.insert(
        "hostids".to_string(),
        json!(query.host_ids.iter().map(HostId::as_str).collect::<Vec<_>>()),
    );

    let mut filter = Map::new();
    if query.active_only {
        filter.insert("status".to_string(), json!(0));
    }

    match &query.pattern {
        Some(SearchPattern::ExactKey(key)) => {
            filter.insert("key_".to_string(), json!(key));
        }
        Some(SearchPattern::NameContains(name)) => {
            params.insert("search".to_string(), json!({ "name": format!("*{}*", name) }));
            params.insert("searchWildcardsEnabled".to_string(), json!(true));
        }
        Some(SearchPattern::KeyContains(key)) => {
            params.insert("search".to_string(), json!({ "key_": format!("*{}*", key) }));
            params.insert("searchWildcardsEnabled".to_string(), json!(true));
        }
        None => {}
    }

    if !filter.is_empty() {
        params.insert("filter".to_string(), Value::Object(filter));
    }
    if let Some(limit) = query.limit {
        params.insert("limit".to_string(), json!(limit));
    }

    Value::Object(params)
}

pub(crate) fn history_params(query: &HistoryQuery) -> Value {
    json!({
        "output": ["itemid", "clock", "value"],
        "itemids": [query.item_id],
        "history": query.partition.code(),
        "sortfield": "clock",
        "sortorder": "DESC",
        "limit": query.limit,
    })
}

pub(crate) fn interface_params(host_ids: &[HostId]) -> Value {
    json!({
        "output": INTERFACE_OUTPUT,
        "hostids": host_ids.iter().map(HostId::as_str).collect::<Vec<_>>(),
    })
}

#[async_trait]
impl ItemSource for ZabbixApi {
    async fn get_items(&self, query: &ItemQuery) -> CmdbResult<Vec<MonitoringItem>> {
        self.client.call("item.get", &item_params(query)).await
    }
}

#[async_trait]
impl HistorySource for ZabbixApi {
    async fn get_history(&self, query: &HistoryQuery) -> CmdbResult<Vec<HistoryRecord>> {
        self.client.call("history.get", &history_params(query)).await
    }
}

#[async_trait]
impl InterfaceSource for ZabbixApi {
    async fn get_interfaces(&self, host_ids: &[HostId]) -> CmdbResult<Vec<HostInterface>> {
        self.client
            .call("hostinterface.get", &interface_params(host_ids))
            .await
    }
}
