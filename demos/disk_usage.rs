use std::env;
use tracing_subscriber::EnvFilter;
use zabbix_cmdb::{CmdbClient, CmdbResult, HostId, finder::format};

#[tokio::main]
async fn main() -> CmdbResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = CmdbClient::builder()
        .url(env::var("ZABBIX_URL").unwrap_or_default())?
        .api_token(env::var("ZABBIX_API_TOKEN").unwrap_or_default())?
        .build()?;

    let host: HostId = env::var("ZABBIX_HOST_ID")
        .unwrap_or_else(|_| "10084".to_string())
        .parse()?;

    let finder = client.finder();
    let total = finder.find_storage_total(&host).await?;
    let usage = finder.find_disk_usage(&host).await?.unwrap_or_default();

    println!(
        "Total: {}",
        total.map(format::format_bytes).unwrap_or_else(|| format::PLACEHOLDER.to_string())
    );
    println!("{}", format::format_disk_usage(&usage));
    Ok(())
}
