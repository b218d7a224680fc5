mod api_token;
mod host_id;
pub(crate) mod serde_helpers;
mod zabbix_url;

pub use api_token::ApiToken;
pub use host_id::HostId;
pub use zabbix_url::{ZabbixUrl, ZabbixUrlConfig};

