// src/exec/executor.rs

//! Per-host remote executor actor.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::aggregate::{AggregateSettings, aggregate};
use crate::errors::{HostwatchError, Result};
use crate::exec::backend::{Connector, RemoteSession};
use crate::exec::lines::{forward_lines, log_lines};

#[derive(Debug, Clone)]
pub struct ExecutorSettings {
    pub aggregate: AggregateSettings,
    /// Capacity of the channel between the data-stream scanner and the
    /// aggregator.
    pub line_buffer: usize,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            aggregate: AggregateSettings::default(),
            line_buffer: 64,
        }
    }
}

/// Run `command` on `host` and feed debounced rows into `rows` until the
/// session ends or `cancel` fires.
///
/// Never returns `Ok`: the result says why this host stopped.
pub async fn execute(
    cancel: CancellationToken,
    host: String,
    command: Arc<str>,
    connector: Arc<dyn Connector>,
    rows: mpsc::Sender<String>,
    settings: ExecutorSettings,
) -> Result<()> {
    info!(host = %host, "connecting");
    let RemoteSession {
        stdout,
        stderr,
        exit,
    } = connector.connect(&host, &command)?;

    let (lines_tx, lines_rx) = mpsc::channel::<String>(settings.line_buffer.max(1));
    let pipeline_cancel = cancel.child_token();

    let mut pipeline = JoinSet::new();
    pipeline.spawn(forward_lines(stdout, lines_tx, host.clone()));
    pipeline.spawn(log_lines(stderr, host.clone()));
    {
        let token = pipeline_cancel.clone();
        let host = host.clone();
        pipeline.spawn(async move {
            if let Err(err) = aggregate(token, lines_rx, settings.aggregate, rows).await {
                debug!(host = %host, error = %err, "aggregator stopped with error");
            }
        });
    }

    let outcome = tokio::select! {
        status = exit => {
            let status = match status {
                Ok(Some(code)) => format!("exit status {code}"),
                Ok(None) => "terminated by signal".to_string(),
                Err(err) => format!("wait failed: {err}"),
            };
            info!(host = %host, %status, "remote session ended");
            HostwatchError::SessionEnded { host: host.clone(), status }
        }
        _ = cancel.cancelled() => {
            debug!(host = %host, "executor canceled; closing session");
            HostwatchError::Canceled
        }
    };

    pipeline_cancel.cancel();
    pipeline.shutdown().await;
    debug!(host = %host, "executor pipeline stopped");

    Err(outcome)
}
