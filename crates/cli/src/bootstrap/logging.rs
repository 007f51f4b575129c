use dns_sieve_domain::{Config, FilterLoadReport};
use std::io::Write;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise the configured level, raised to debug by `-v`.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.effective_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Operator-facing load report. Rejections always go to stderr; the rule count
/// is printed to stdout only in verbose mode.
pub fn report_filter_load(report: &FilterLoadReport, verbose: bool) {
    write_filter_report(report, verbose, &mut std::io::stdout(), &mut std::io::stderr());
}

fn write_filter_report(
    report: &FilterLoadReport,
    verbose: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) {
    for warning in &report.warnings {
        let _ = writeln!(err, "WARNING: {}", warning);
    }
    if verbose {
        let _ = writeln!(out, "Loaded {} filter rules", report.loaded);
    }
}

pub fn print_config_summary(config: &Config, upstream: SocketAddr) {
    println!("Upstream DNS server: {}", upstream);
    println!("Listening port: {}", config.server.port);
    println!("Filter file: {}", config.filter.path);
    println!("Upstream timeout: {} ms", config.upstream.timeout_ms);
}
