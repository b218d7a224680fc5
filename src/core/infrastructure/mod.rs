pub mod api_client;
pub mod zabbix_api;
