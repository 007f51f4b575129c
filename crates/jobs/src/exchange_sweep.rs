use dns_sieve_application::ports::PendingExchangePort;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Evicts upstream exchanges whose deadline passed without the waiting task
/// cleaning up after itself.
pub struct ExchangeSweepJob {
    pending: Arc<dyn PendingExchangePort>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl ExchangeSweepJob {
    pub fn new(pending: Arc<dyn PendingExchangePort>) -> Self {
        Self {
            pending,
            interval: Duration::from_secs(1),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            "Starting pending exchange sweep job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ExchangeSweepJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let evicted = self.pending.sweep_expired(Instant::now());
                        if evicted > 0 {
                            debug!(
                                evicted,
                                remaining = self.pending.pending_count(),
                                "ExchangeSweepJob: expired exchanges evicted"
                            );
                        }
                    }
                }
            }
        });
    }
}
