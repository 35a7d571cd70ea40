//! Shutdown signals and graceful drain of the menu server.

use std::{fmt, io, time::Duration};

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
pub(crate) enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interrupt => "interrupt",
            Self::Terminate => "terminate",
        })
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

// Container runtimes only send SIGTERM on unix; elsewhere Ctrl+C is the only stop.
#[cfg(not(unix))]
async fn terminate() -> Result<ShutdownSignal, ShutdownSignalError> {
    std::future::pending().await
}

async fn wait_for_signal() -> Result<ShutdownSignal, ShutdownSignalError> {
    tokio::select! {
        signal = interrupt() => signal,
        signal = terminate() => signal,
    }
}

/// Wait for a stop signal, then let in-flight requests drain for up to `grace`.
pub(crate) async fn listen(
    handle: ServerHandle,
    grace: Duration,
) -> Result<ShutdownSignal, ShutdownSignalError> {
    let signal = wait_for_signal().await?;

    info!(
        %signal,
        grace_secs = grace.as_secs(),
        "shutdown signal received, draining requests"
    );

    handle.stop_graceful(Some(grace));

    Ok(signal)
}
