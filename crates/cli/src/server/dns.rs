use anyhow::Context;
use dns_sieve_domain::Config;
use dns_sieve_infrastructure::dns::DnsServerHandler;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Largest UDP payload; a smaller buffer would truncate EDNS0-sized queries
/// before they are relayed.
const RECV_BUF_SIZE: usize = 65_535;

/// Binds the IPv4 listener and, unless disabled, the IPv6 listener on the same
/// port. Only the IPv4 bind is required to succeed.
pub fn bind_listeners(config: &Config) -> anyhow::Result<Vec<Arc<UdpSocket>>> {
    let port = config.server.port;
    let mut listeners = Vec::with_capacity(2);

    let v4: IpAddr = config
        .server
        .bind_v4
        .parse()
        .with_context(|| format!("Invalid IPv4 bind address '{}'", config.server.bind_v4))?;
    let v4_addr = SocketAddr::new(v4, port);
    let socket = create_udp_socket(v4_addr)
        .with_context(|| format!("Failed to bind UDP listener on {}", v4_addr))?;
    info!(bind_address = %v4_addr, "IPv4 UDP listener bound");
    listeners.push(Arc::new(socket));

    let bind_v6 = config.server.bind_v6.trim();
    if bind_v6.is_empty() {
        info!("IPv6 listener disabled");
        return Ok(listeners);
    }

    match bind_v6.parse::<IpAddr>() {
        Ok(v6) => {
            let v6_addr = SocketAddr::new(v6, port);
            match create_udp_socket(v6_addr) {
                Ok(socket) => {
                    info!(bind_address = %v6_addr, "IPv6 UDP listener bound");
                    listeners.push(Arc::new(socket));
                }
                Err(e) => {
                    warn!(bind_address = %v6_addr, error = %e, "IPv6 listener unavailable, serving IPv4 only");
                }
            }
        }
        Err(e) => {
            warn!(bind_address = bind_v6, error = %e, "Invalid IPv6 bind address, serving IPv4 only");
        }
    }

    Ok(listeners)
}

/// Runs one receive loop per listener until `shutdown` fires.
pub async fn start_dns_server(
    listeners: Vec<Arc<UdpSocket>>,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) {
    let mut join_set: JoinSet<()> = JoinSet::new();

    for socket in listeners {
        let handler = handler.clone();
        let shutdown = shutdown.clone();
        join_set.spawn(async move {
            run_udp_listener(socket, handler, shutdown).await;
        });
    }

    info!("DNS server ready");

    while join_set.join_next().await.is_some() {}
}

async fn run_udp_listener(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) {
    let local = socket.local_addr().ok();
    let mut recv_buf = vec![0u8; RECV_BUF_SIZE];

    loop {
        let (len, from) = tokio::select! {
            _ = shutdown.cancelled() => {
                info!(listener = ?local, "UDP listener shutting down");
                break;
            }
            result = socket.recv_from(&mut recv_buf) => match result {
                Ok(r) => r,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    // ICMP-induced errors from earlier sends land here; the
                    // socket itself is still usable.
                    debug!(listener = ?local, error = %e, "UDP recv error");
                    continue;
                }
            },
        };

        let owned_buf: Arc<[u8]> = Arc::from(&recv_buf[..len]);
        let handler = handler.clone();
        let socket = socket.clone();
        tokio::spawn(async move {
            if let Some(response) = handler.handle_datagram(&owned_buf, from).await {
                if let Err(e) = socket.send_to(&response, from).await {
                    debug!(client = %from, error = %e, "Failed to send DNS response");
                }
            }
        });
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> io::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        // The IPv4 listener owns v4 traffic on this port.
        socket.set_only_v6(true)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}
