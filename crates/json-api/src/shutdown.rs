//! Graceful shutdown

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    Interrupt(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    Terminate(#[source] io::Error),
}

/// Signal that stopped the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownSignal {
    Interrupt,
    #[cfg(unix)]
    Terminate,
}

impl ShutdownSignal {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Interrupt => "interrupt",
            #[cfg(unix)]
            Self::Terminate => "terminate",
        }
    }
}

async fn interrupt() -> Result<ShutdownSignal, ShutdownSignalError> {
    signal::ctrl_c()
        .await
        .map_err(ShutdownSignalError::Interrupt)?;

    Ok(ShutdownSignal::Interrupt)
}

#[cfg(unix)]
async fn terminate() -> Result<ShutdownSignal, ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::Terminate)?
        .recv()
        .await;

    Ok(ShutdownSignal::Terminate)
}

#[cfg(not(unix))]
async fn terminate() -> Result<ShutdownSignal, ShutdownSignalError> {
    std::future::pending().await
}

/// Wait for Ctrl+C or SIGTERM, then stop accepting connections and give
/// in-flight requests up to `grace` to finish. Checkouts waiting on the
/// payment processor are the slowest of these.
pub(crate) async fn listen(handle: ServerHandle, grace: Duration) -> Result<(), ShutdownSignalError> {
    let received = tokio::select! {
        received = interrupt() => received?,
        received = terminate() => received?,
    };

    info!(
        signal = received.as_str(),
        grace_seconds = grace.as_secs(),
        "shutting down"
    );

    handle.stop_graceful(Some(grace));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_have_log_names() {
        assert_eq!(ShutdownSignal::Interrupt.as_str(), "interrupt");
    }
}
