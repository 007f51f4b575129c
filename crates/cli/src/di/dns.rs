use anyhow::Context;
use dns_sieve_application::use_cases::{HandleDnsQueryUseCase, ReloadFilterUseCase};
use dns_sieve_domain::{Config, FilterLoadReport};
use dns_sieve_infrastructure::dns::{BlockFilterEngine, DnsServerHandler, UdpUpstream};
use dns_sieve_infrastructure::filter_file::FileFilterSource;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub handler: Arc<DnsServerHandler>,
    pub engine: Arc<BlockFilterEngine>,
    pub upstream: Arc<UdpUpstream>,
    pub reload_filter: Arc<ReloadFilterUseCase>,
}

impl DnsServices {
    /// Wires the pipeline and performs the initial filter load. An unreadable
    /// filter file is a startup error.
    pub async fn new(
        config: &Config,
        upstream_addr: SocketAddr,
    ) -> anyhow::Result<(Self, FilterLoadReport)> {
        info!("Initializing DNS services");

        let engine = Arc::new(BlockFilterEngine::empty());
        let source = Arc::new(FileFilterSource::new(&config.filter.path));
        let reload_filter = Arc::new(ReloadFilterUseCase::new(engine.clone(), source));

        let report = reload_filter
            .execute()
            .await
            .with_context(|| format!("Failed to load filter file '{}'", config.filter.path))?;

        let upstream = Arc::new(
            UdpUpstream::bind(upstream_addr, config.upstream.timeout())
                .context("Failed to set up upstream transport")?,
        );

        let use_case = Arc::new(HandleDnsQueryUseCase::new(engine.clone(), upstream.clone()));
        let handler = Arc::new(DnsServerHandler::new(use_case));

        Ok((
            Self {
                handler,
                engine,
                upstream,
                reload_filter,
            },
            report,
        ))
    }
}
