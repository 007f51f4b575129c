use crate::bootstrap::report_filter_load;
use dns_sieve_application::use_cases::ReloadFilterUseCase;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Resolves on SIGINT, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, initiating shutdown"),
        _ = wait_for_sigterm() => info!("Received SIGTERM, initiating shutdown"),
    }
}

#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            error!(error = %e, "Failed to register SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await;
}

/// Re-reads the filter file on every SIGHUP. A failed read keeps the rules
/// currently in force.
#[cfg(unix)]
pub fn spawn_reload_on_hangup(
    reload: Arc<ReloadFilterUseCase>,
    verbose: bool,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup())?;
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                received = hangup.recv() => {
                    if received.is_none() {
                        break;
                    }
                    info!("Received SIGHUP, reloading filter");
                    match reload.execute().await {
                        Ok(report) => report_filter_load(&report, verbose),
                        Err(e) => error!(error = %e, "Filter reload failed, keeping current rules"),
                    }
                }
            }
        }
    });
    Ok(())
}

#[cfg(not(unix))]
pub fn spawn_reload_on_hangup(
    _reload: Arc<ReloadFilterUseCase>,
    _verbose: bool,
    _shutdown: CancellationToken,
) -> anyhow::Result<()> {
    Ok(())
}
