use async_trait::async_trait;
use dns_sieve_domain::{DnsRequest, DomainError};
use std::net::SocketAddr;

#[async_trait]
pub trait UpstreamPort: Send + Sync {
    /// Forwards the request's wire bytes and returns the upstream reply,
    /// relabelled with the transaction id the client originally used.
    async fn exchange(&self, request: &DnsRequest) -> Result<Vec<u8>, DomainError>;

    fn server_addr(&self) -> SocketAddr;
}
