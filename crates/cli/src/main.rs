use clap::Parser;
use dns_sieve_application::ports::BlockFilterPort;
use dns_sieve_domain::CliOverrides;
use dns_sieve_jobs::{ExchangeSweepJob, FilterReloadJob, JobRunner};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser, Debug)]
#[command(name = "dns-sieve")]
#[command(version)]
#[command(about = "DNS filtering proxy: refuses blocked names, forwards the rest upstream")]
struct Cli {
    /// Upstream DNS server (IP, IP:PORT, [IPv6]:PORT or hostname)
    #[arg(short = 's', long = "server", value_name = "ADDR")]
    server: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long, value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,

    /// Filter file with one blocked domain per line
    #[arg(short = 'f', long = "filter", value_name = "FILE")]
    filter: Option<String>,

    /// Report loaded rules and trace every query
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Upstream reply timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            upstream_server: self.server.clone(),
            port: self.port,
            filter_path: self.filter.clone(),
            verbose: self.verbose,
            timeout_ms: self.timeout_ms,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);

    info!("Starting dns-sieve v{}", env!("CARGO_PKG_VERSION"));

    let upstream_addr = bootstrap::resolve_upstream(&config).await?;
    if config.verbose() {
        bootstrap::print_config_summary(&config, upstream_addr);
    }

    let (services, report) = di::DnsServices::new(&config, upstream_addr).await?;
    bootstrap::report_filter_load(&report, config.verbose());
    info!(
        rules = services.engine.rule_count(),
        upstream = %upstream_addr,
        "Filter loaded"
    );

    let listeners = server::bind_listeners(&config)?;

    let shutdown = CancellationToken::new();

    let mut jobs = JobRunner::new()
        .with_exchange_sweep(ExchangeSweepJob::new(services.upstream.pending()))
        .with_shutdown_token(shutdown.clone());
    if config.filter.reload_interval_secs > 0 {
        jobs = jobs.with_filter_reload(FilterReloadJob::new(
            services.reload_filter.clone(),
            Duration::from_secs(config.filter.reload_interval_secs),
        ));
    }
    jobs.start().await;

    server::spawn_reload_on_hangup(
        services.reload_filter.clone(),
        config.verbose(),
        shutdown.clone(),
    )?;

    let dns_server = tokio::spawn(server::start_dns_server(
        listeners,
        Arc::clone(&services.handler),
        shutdown.clone(),
    ));

    server::shutdown_signal().await;
    shutdown.cancel();
    let _ = dns_server.await;

    info!("Server shutdown complete");
    Ok(())
}
