use anyhow::Context;
use dns_sieve_domain::{CliOverrides, Config, UpstreamAddr};
use std::net::SocketAddr;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    Config::load(path, overrides).context("Invalid configuration")
}

/// Turns the configured upstream into a socket address, consulting the system
/// resolver once when a hostname was given.
pub async fn resolve_upstream(config: &Config) -> anyhow::Result<SocketAddr> {
    let addr = config
        .upstream
        .addr()
        .map_err(anyhow::Error::msg)
        .context("Invalid upstream server")?;

    match addr {
        UpstreamAddr::Resolved(socket_addr) => Ok(socket_addr),
        UpstreamAddr::Unresolved { hostname, port } => {
            let all: Vec<SocketAddr> = tokio::net::lookup_host((hostname.as_ref(), port))
                .await
                .with_context(|| format!("Failed to resolve upstream host '{}'", hostname))?
                .collect();
            // Prefer IPv4; the upstream socket family follows this choice.
            all.iter()
                .find(|a| a.is_ipv4())
                .or_else(|| all.first())
                .copied()
                .with_context(|| format!("Upstream host '{}' has no addresses", hostname))
        }
    }
}
