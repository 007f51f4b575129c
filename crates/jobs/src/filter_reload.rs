use dns_sieve_application::use_cases::ReloadFilterUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Periodically re-reads the filter source and swaps in a fresh snapshot.
///
/// The first tick is consumed up front: the filter was already loaded at
/// startup.
pub struct FilterReloadJob {
    reload: Arc<ReloadFilterUseCase>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl FilterReloadJob {
    pub fn new(reload: Arc<ReloadFilterUseCase>, interval: Duration) -> Self {
        Self {
            reload,
            interval,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting filter reload job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("FilterReloadJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.reload.execute().await {
                            Ok(report) => info!(
                                loaded = report.loaded,
                                rejected = report.rejected(),
                                "FilterReloadJob: reload completed"
                            ),
                            Err(e) => error!(
                                error = %e,
                                "FilterReloadJob: reload failed, keeping current rules"
                            ),
                        }
                    }
                }
            }
        });
    }
}
