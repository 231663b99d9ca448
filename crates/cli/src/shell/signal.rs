//! Termination signal handling
//!
//! SIGTERM or Ctrl+C arms the shell's cancellation token. The token is never
//! reset, so the first signal is the only one that matters.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Cancel `cancel` when the process is asked to terminate
pub fn spawn_termination_watcher(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            signal = wait_for_termination() => {
                info!("Received {signal}, shutting down");
                cancel.cancel();
            }
        }
    })
}

#[cfg(unix)]
async fn wait_for_termination() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => "Ctrl+C",
                _ = terminate.recv() => "SIGTERM",
            }
        }
        Err(e) => {
            warn!("Failed to install SIGTERM handler: {e}");
            wait_for_ctrl_c().await
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_termination() -> &'static str {
    wait_for_ctrl_c().await
}

async fn wait_for_ctrl_c() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    "Ctrl+C"
}
