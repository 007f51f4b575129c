use super::DnsQuery;
use std::net::SocketAddr;
use std::sync::Arc;

/// A parsed query together with the datagram it came from and who sent it.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub query: DnsQuery,
    pub client: SocketAddr,
    /// Original wire bytes, forwarded verbatim (apart from the id) when allowed.
    pub packet: Arc<[u8]>,
}

impl DnsRequest {
    pub fn new(query: DnsQuery, client: SocketAddr, packet: impl Into<Arc<[u8]>>) -> Self {
        Self {
            query,
            client,
            packet: packet.into(),
        }
    }
}
