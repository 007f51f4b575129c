use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// Loopback resolver answering A queries from a fixed table.
///
/// Unknown names get NXDOMAIN. In silent mode nothing is ever answered.
pub struct FakeUpstream {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    received_ids: Arc<Mutex<Vec<u16>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

#[derive(Clone, Default)]
pub struct FakeUpstreamOptions {
    pub records: HashMap<String, Ipv4Addr>,
    pub delay: Duration,
    pub silent: bool,
}

impl FakeUpstream {
    pub async fn start(records: &[(&str, Ipv4Addr)]) -> Self {
        Self::start_with(FakeUpstreamOptions {
            records: records
                .iter()
                .map(|(name, ip)| (name.to_string(), *ip))
                .collect(),
            ..Default::default()
        })
        .await
    }

    pub async fn silent() -> Self {
        Self::start_with(FakeUpstreamOptions {
            silent: true,
            ..Default::default()
        })
        .await
    }

    pub async fn start_with(options: FakeUpstreamOptions) -> Self {
        let socket = Arc::new(UdpSocket::bind("127.0.0.1:0").await.unwrap());
        let addr = socket.local_addr().unwrap();
        let received = Arc::new(AtomicUsize::new(0));
        let received_ids = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let options = Arc::new(options);

        let counter = Arc::clone(&received);
        let ids = Arc::clone(&received_ids);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);
                        let query = buf[..len].to_vec();
                        if query.len() >= 2 {
                            ids.lock().unwrap().push(u16::from_be_bytes([query[0], query[1]]));
                        }
                        if options.silent {
                            continue;
                        }
                        let socket = Arc::clone(&socket);
                        let options = Arc::clone(&options);
                        tokio::spawn(async move {
                            if !options.delay.is_zero() {
                                tokio::time::sleep(options.delay).await;
                            }
                            if let Some(reply) = answer(&query, &options.records) {
                                let _ = socket.send_to(&reply, peer).await;
                            }
                        });
                    }
                }
            }
        });

        Self {
            addr,
            received,
            received_ids,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    pub fn received_ids(&self) -> Vec<u16> {
        self.received_ids.lock().unwrap().clone()
    }
}

impl Drop for FakeUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// The reply the fake sends for `query`, with the query's own id.
///
/// Decoded independently of the proxy's own parser.
pub fn answer(query: &[u8], records: &HashMap<String, Ipv4Addr>) -> Option<Vec<u8>> {
    let request = Message::from_vec(query).ok()?;
    let question = request.queries.first()?.clone();
    let name = question.name().to_lowercase().to_utf8();
    let ip = records.get(name.trim_end_matches('.'));

    let mut reply = Message::new(request.id, MessageType::Response, request.op_code);
    reply.metadata.recursion_desired = request.recursion_desired;
    reply.metadata.recursion_available = true;
    reply.add_query(question.clone());
    match ip {
        Some(ip) => {
            reply.add_answer(Record::from_rdata(
                question.name().clone(),
                60,
                RData::A(A(*ip)),
            ));
        }
        None => reply.metadata.response_code = ResponseCode::NXDomain,
    }

    reply.to_vec().ok()
}
