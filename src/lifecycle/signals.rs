//! Maps process signals onto the shutdown coordinator.

use crate::framework::ShutdownCoordinator;
use std::io;
use tracing::{info, warn};

/// Waits for SIGINT (Ctrl-C) or SIGTERM, then requests shutdown once.
///
/// Returns early without doing anything if the table was already stopped by
/// someone else. No other signals are handled.
pub async fn shutdown_on_signal(shutdown: ShutdownCoordinator) {
    let signal = tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => "SIGINT",
            Err(e) => {
                warn!(error = %e, "Cannot listen for Ctrl-C");
                return;
            }
        },
        result = terminate() => match result {
            Ok(()) => "SIGTERM",
            Err(e) => {
                warn!(error = %e, "Cannot listen for SIGTERM");
                return;
            }
        },
        _ = shutdown.cancelled() => return,
    };

    info!(signal, "Signal received");
    shutdown.request_shutdown();
}

#[cfg(unix)]
async fn terminate() -> io::Result<()> {
    let mut stream = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
    stream.recv().await;
    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> io::Result<()> {
    std::future::pending().await
}
