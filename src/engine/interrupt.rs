// src/engine/interrupt.rs

//! Interrupt actor: turns SIGINT/SIGTERM into a group shutdown.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::{HostwatchError, Result};

/// Block until a termination signal arrives or `cancel` fires.
///
/// Always returns an error naming the cause.
pub async fn interrupt(cancel: CancellationToken) -> Result<()> {
    interrupt_on(cancel, termination_signal()).await
}

/// Same as [`interrupt`], with the signal source supplied by the caller.
pub async fn interrupt_on<S>(cancel: CancellationToken, signal: S) -> Result<()>
where
    S: Future<Output = Result<&'static str>>,
{
    tokio::select! {
        received = signal => {
            let name = received?;
            debug!(signal = name, "termination signal received");
            Err(HostwatchError::Signal(name.to_string()))
        }
        _ = cancel.cancelled() => Err(HostwatchError::Canceled),
    }
}

#[cfg(unix)]
async fn termination_signal() -> Result<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res.map(|_| "SIGINT").map_err(HostwatchError::from),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn termination_signal() -> Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("SIGINT")
}
