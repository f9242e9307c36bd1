// src/render/renderer.rs

//! Dashboard renderer.
//!
//! Runs its own actor group: one update actor per host, copying rows from
//! that host's channel into its [`RowCache`] and requesting a repaint, plus
//! one render loop that redraws the whole screen per pending repaint.

use std::sync::Arc;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::aggregate::now_timestamp;
use crate::engine::Group;
use crate::errors::{HostwatchError, Result};
use crate::render::cache::RowCache;
use crate::render::signal::{RepaintSignal, RepaintWaiter, repaint_channel};
use crate::render::table::format_table;

/// Cursor home + clear screen.
pub const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Column separator; the same string the aggregator joins lines with.
    pub separator: String,
    pub timestamp_format: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            separator: "\t".to_string(),
            timestamp_format: "%H:%M:%S".to_string(),
        }
    }
}

/// Render rows from `rows` (one receiver per host, in display order) to
/// `sink` until cancelled or a write fails.
pub async fn render<W>(
    cancel: CancellationToken,
    rows: Vec<mpsc::Receiver<String>>,
    sink: W,
    settings: RenderSettings,
) -> Result<()>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let caches: Vec<Arc<RowCache>> = rows.iter().map(|_| Arc::new(RowCache::new())).collect();
    let (signal, waiter) = repaint_channel();

    let mut group = Group::new();

    for (idx, (src, cache)) in rows.into_iter().zip(caches.iter().cloned()).enumerate() {
        let token = cancel.child_token();
        let stop = token.clone();
        group.add(
            format!("row-update-{idx}"),
            update(token, src, cache, signal.clone()),
            move |_| stop.cancel(),
        );
    }
    drop(signal);

    {
        let token = cancel.child_token();
        let stop = token.clone();
        group.add(
            "render-loop",
            render_loop(token, waiter, caches, sink, settings),
            move |_| stop.cancel(),
        );
    }

    group.run().await
}

/// Copy each arriving row into `cache` and request a repaint.
///
/// A closed source leaves the last row in place; the task then just waits
/// for cancellation.
pub async fn update(
    cancel: CancellationToken,
    mut src: mpsc::Receiver<String>,
    cache: Arc<RowCache>,
    repaint: RepaintSignal,
) -> Result<()> {
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(HostwatchError::Canceled),
            row = src.recv() => match row {
                Some(row) => {
                    cache.write(row);
                    let queued = repaint.request();
                    trace!(queued, "row updated");
                }
                None => {
                    debug!("row source closed; keeping last row");
                    cancel.cancelled().await;
                    return Err(HostwatchError::Canceled);
                }
            },
        }
    }
}

/// Redraw once per pending repaint until cancelled.
pub async fn render_loop<W>(
    cancel: CancellationToken,
    mut waiter: RepaintWaiter,
    caches: Vec<Arc<RowCache>>,
    mut sink: W,
    settings: RenderSettings,
) -> Result<()>
where
    W: AsyncWrite + Unpin + Send,
{
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(HostwatchError::Canceled),
            pending = waiter.wait() => {
                if !pending {
                    cancel.cancelled().await;
                    return Err(HostwatchError::Canceled);
                }
                paint(&mut sink, &caches, &settings).await?;
            }
        }
    }
}

/// Write one full frame: clear, table, timestamp footer, blank line.
pub async fn paint<W>(sink: &mut W, caches: &[Arc<RowCache>], settings: &RenderSettings) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let rows: Vec<String> = caches.iter().map(|c| c.read()).collect();

    let mut frame = String::from(CLEAR_SCREEN);
    frame.push_str(&format_table(&rows, &settings.separator));
    frame.push_str(&now_timestamp(&settings.timestamp_format));
    frame.push_str("\n\n");

    sink.write_all(frame.as_bytes()).await?;
    sink.flush().await?;
    Ok(())
}
