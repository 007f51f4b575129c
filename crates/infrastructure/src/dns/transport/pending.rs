use crate::dns::wire_response::rewrite_id;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use dns_sieve_application::ports::PendingExchangePort;
use rustc_hash::FxBuildHasher;
use std::net::SocketAddr;
use std::time::Instant;
use tokio::sync::oneshot;
use tracing::debug;

/// Random draws before giving up on finding a free proxy-side id.
const MAX_ID_ATTEMPTS: usize = 64;

/// One query forwarded upstream and not yet answered.
pub struct PendingExchange {
    pub client: SocketAddr,
    pub original_id: u16,
    pub deadline: Instant,
    reply_tx: oneshot::Sender<Vec<u8>>,
}

/// Dispatch table keyed by the proxy-side transaction id.
///
/// Every transition removes the entry atomically, so a reply is delivered at
/// most once and a late reply after timeout finds nothing.
pub struct PendingExchanges {
    entries: DashMap<u16, PendingExchange, FxBuildHasher>,
}

impl PendingExchanges {
    pub fn new() -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// Reserves a fresh proxy-side id for the exchange. `None` when no free id
    /// was found, which only happens when the table is close to full.
    pub fn register(
        &self,
        client: SocketAddr,
        original_id: u16,
        deadline: Instant,
    ) -> Option<(u16, oneshot::Receiver<Vec<u8>>)> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let proxy_id = fastrand::u16(..);
            if let Entry::Vacant(slot) = self.entries.entry(proxy_id) {
                let (reply_tx, reply_rx) = oneshot::channel();
                slot.insert(PendingExchange {
                    client,
                    original_id,
                    deadline,
                    reply_tx,
                });
                return Some((proxy_id, reply_rx));
            }
        }
        None
    }

    /// Hands `reply` to the task waiting on `proxy_id`, relabelled with the
    /// client's original id. Returns `false` for an unknown or settled id.
    pub fn complete(&self, proxy_id: u16, mut reply: Vec<u8>) -> bool {
        let Some((_, exchange)) = self.entries.remove(&proxy_id) else {
            return false;
        };
        rewrite_id(&mut reply, exchange.original_id);
        exchange.reply_tx.send(reply).is_ok()
    }

    /// Drops the entry without delivering anything.
    pub fn cancel(&self, proxy_id: u16) -> bool {
        self.entries.remove(&proxy_id).is_some()
    }

    /// Evicts every exchange whose deadline is at or before `now`. Waiting
    /// tasks observe the dropped sender as a timeout.
    pub fn sweep_expired(&self, now: Instant) -> usize {
        let expired: Vec<u16> = self
            .entries
            .iter()
            .filter(|e| e.deadline <= now)
            .map(|e| *e.key())
            .collect();

        let mut evicted = 0;
        for id in expired {
            if let Some((_, exchange)) = self.entries.remove_if(&id, |_, ex| ex.deadline <= now) {
                debug!(
                    proxy_id = id,
                    original_id = exchange.original_id,
                    client = %exchange.client,
                    "Pending exchange expired"
                );
                evicted += 1;
            }
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PendingExchangePort for PendingExchanges {
    fn sweep_expired(&self, now: Instant) -> usize {
        PendingExchanges::sweep_expired(self, now)
    }

    fn pending_count(&self) -> usize {
        self.len()
    }
}

impl Default for PendingExchanges {
    fn default() -> Self {
        Self::new()
    }
}
