//! UDP upstream transport (RFC 1035 §4.2.1)
//!
//! Every forwarded query leaves through one shared socket with a fresh
//! proxy-side transaction id. A single reader task receives all replies and
//! routes them through [`PendingExchanges`] to the task that is waiting.

use super::pending::PendingExchanges;
use crate::dns::query_parser::{DnsHeader, HEADER_LEN};
use crate::dns::wire_response::rewrite_id;
use async_trait::async_trait;
use dns_sieve_application::ports::UpstreamPort;
use dns_sieve_domain::{DnsRequest, DomainError, ResponseCode};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Largest datagram UDP can carry; upstream replies sized for EDNS0 clients
/// must not be truncated on receive.
const MAX_UDP_RESPONSE_SIZE: usize = 65_535;

pub struct UdpUpstream {
    server_addr: SocketAddr,
    timeout: Duration,
    socket: Arc<UdpSocket>,
    pending: Arc<PendingExchanges>,
    reader: JoinHandle<()>,
}

impl UdpUpstream {
    /// Binds the shared upstream socket and starts the reply reader.
    /// Must be called inside a Tokio runtime.
    pub fn bind(server_addr: SocketAddr, timeout: Duration) -> Result<Self, DomainError> {
        let socket = Arc::new(create_socket(server_addr).map_err(|e| {
            DomainError::IoError(format!("Failed to bind upstream UDP socket: {}", e))
        })?);
        let pending = Arc::new(PendingExchanges::new());

        let reader = tokio::spawn(read_replies(
            Arc::clone(&socket),
            Arc::clone(&pending),
            server_addr,
        ));

        info!(
            server = %server_addr,
            local = ?socket.local_addr().ok(),
            timeout_ms = timeout.as_millis() as u64,
            "Upstream UDP transport ready"
        );

        Ok(Self {
            server_addr,
            timeout,
            socket,
            pending,
            reader,
        })
    }

    /// Shared with the sweep job.
    pub fn pending(&self) -> Arc<PendingExchanges> {
        Arc::clone(&self.pending)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Drop for UdpUpstream {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

#[async_trait]
impl UpstreamPort for UdpUpstream {
    async fn exchange(&self, request: &DnsRequest) -> Result<Vec<u8>, DomainError> {
        let deadline = Instant::now() + self.timeout;
        let (proxy_id, reply_rx) = self
            .pending
            .register(request.client, request.query.id, deadline)
            .ok_or_else(|| {
                DomainError::IoError(format!(
                    "No free transaction id for {} ({} exchanges pending)",
                    self.server_addr,
                    self.pending.len()
                ))
            })?;

        let mut packet = request.packet.to_vec();
        rewrite_id(&mut packet, proxy_id);

        if let Err(e) = self.socket.send_to(&packet, self.server_addr).await {
            self.pending.cancel(proxy_id);
            return Err(DomainError::from_upstream_io(&e, self.server_addr.to_string()));
        }

        debug!(
            server = %self.server_addr,
            proxy_id,
            original_id = request.query.id,
            bytes_sent = packet.len(),
            "UDP query sent"
        );

        match tokio::time::timeout(self.timeout, reply_rx).await {
            Ok(Ok(reply)) => Ok(reply),
            // Sender dropped: the sweep evicted the entry first.
            Ok(Err(_)) => Err(DomainError::QueryTimeout),
            Err(_) => {
                self.pending.cancel(proxy_id);
                Err(DomainError::QueryTimeout)
            }
        }
    }

    fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }
}

async fn read_replies(
    socket: Arc<UdpSocket>,
    pending: Arc<PendingExchanges>,
    server_addr: SocketAddr,
) {
    let mut buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

    loop {
        let (len, from) = match socket.recv_from(&mut buf).await {
            Ok(r) => r,
            Err(e) => {
                // ICMP errors surface here on some platforms; keep reading.
                warn!(server = %server_addr, error = %e, "Upstream UDP receive failed");
                continue;
            }
        };

        if let Err(e) = dispatch_reply(&pending, server_addr, from, &buf[..len]) {
            debug!(server = %server_addr, received_from = %from, error = %e, "Upstream datagram discarded");
        }
    }
}

/// Routes one datagram from the upstream socket. Anything that is not a reply
/// from the configured upstream to a pending id is rejected.
fn dispatch_reply(
    pending: &PendingExchanges,
    server_addr: SocketAddr,
    from: SocketAddr,
    datagram: &[u8],
) -> Result<(), DomainError> {
    if from != server_addr {
        return Err(DomainError::InvalidDnsResponse(format!(
            "reply from {} instead of {}",
            from, server_addr
        )));
    }

    let header = DnsHeader::parse(datagram).ok_or_else(|| {
        DomainError::InvalidDnsResponse(format!(
            "{} bytes, shorter than the {}-byte header",
            datagram.len(),
            HEADER_LEN
        ))
    })?;
    if !header.is_response() {
        return Err(DomainError::InvalidDnsResponse(format!(
            "id {} has no QR bit",
            header.id
        )));
    }

    if !pending.complete(header.id, datagram.to_vec()) {
        return Err(DomainError::InvalidDnsResponse(format!(
            "id {} matches no pending exchange",
            header.id
        )));
    }

    debug!(
        proxy_id = header.id,
        rcode = ?ResponseCode::from_low_bits(header.flags as u8),
        bytes = datagram.len(),
        "Upstream reply delivered"
    );
    Ok(())
}

fn create_socket(server: SocketAddr) -> Result<UdpSocket, std::io::Error> {
    use socket2::{Domain, Protocol, Socket, Type};

    let (domain, bind_addr) = if server.is_ipv4() {
        (
            Domain::IPV4,
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
        )
    } else {
        (
            Domain::IPV6,
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        )
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(128 * 1024)?;

    socket.bind(&bind_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}
