use std::env;
use tracing_subscriber::EnvFilter;
use zabbix_cmdb::{
    CmdbClient, CmdbResult, HostFilter, HostId, HostRef, SortField, SortOrder, finder::format,
    sort_reports,
};

#[tokio::main]
async fn main() -> CmdbResult<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = CmdbClient::builder()
        .url(env::var("ZABBIX_URL").unwrap_or_default())?
        .api_token(env::var("ZABBIX_API_TOKEN").unwrap_or_default())?
        .rate_limit(20, 5)
        .build()?;

    let hosts = env::var("ZABBIX_HOST_IDS")
        .unwrap_or_else(|_| "10084".to_string())
        .split(',')
        .map(|id| -> CmdbResult<HostRef> {
            let id = id.trim();
            Ok(HostRef::new(HostId::new(id)?, id, id))
        })
        .collect::<CmdbResult<Vec<_>>>()?;

    let hosts = HostFilter::default().excluding_url_checks().apply(hosts);
    let (mut reports, totals) = client.inventory(&hosts).await;

    let field: SortField = env::var("CMDB_SORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();
    let order: SortOrder = env::var("CMDB_SORT_ORDER")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();
    sort_reports(&mut reports, field, order);
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| format::PLACEHOLDER.to_string());

    for report in &reports {
        println!("{} ({})", report.name, report.availability.label());
        println!("  CPU:     {} @ {}", show(&report.cpu_total), show(&report.cpu_usage));
        println!("  Memory:  {} @ {}", show(&report.memory_total), show(&report.memory_usage));
        println!("  Storage: {}", show(&report.storage_total));
        println!("  Kernel:  {}", show(&report.kernel_version));
        println!(
            "  OS:      {} {}",
            show(&report.operating_system),
            show(&report.os_architecture)
        );
    }

    println!(
        "{} hosts, {} CPUs, {} memory, {} storage",
        totals.hosts,
        totals.cpu_count,
        totals.memory(),
        totals.storage()
    );
    Ok(())
}
