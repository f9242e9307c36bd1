// src/aggregate.rs

//! Per-host line aggregation.
//!
//! Lines from one host arrive in bursts (one burst per script run). The
//! aggregator buffers them and, once no new line has arrived for the
//! debounce interval, emits a single row: a flush-time timestamp followed by
//! every buffered line, joined by the delimiter.
//!
//! ```text
//! Idle --line--> Buffering --line--> Buffering (timer re-armed)
//!                    |
//!                 timer fires
//!                    v
//!           emit "<ts>\t<l1>\t<l2>..." --> Idle
//! ```

use std::fmt::Write as _;
use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::errors::Result;

const FALLBACK_TIMESTAMP_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone)]
pub struct AggregateSettings {
    /// Quiet period measured from the most recent line.
    pub debounce: Duration,
    pub delimiter: String,
    pub timestamp_format: String,
}

impl Default for AggregateSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(250),
            delimiter: "\t".to_string(),
            timestamp_format: FALLBACK_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

/// Consume `lines` and emit debounced rows on `rows` until cancelled.
///
/// Cancellation stops immediately and drops whatever is buffered. When the
/// line source closes, a pending burst is still flushed once its timer fires,
/// then the aggregator returns. A closed row sink also ends it.
pub async fn aggregate(
    cancel: CancellationToken,
    mut lines: mpsc::Receiver<String>,
    settings: AggregateSettings,
    rows: mpsc::Sender<String>,
) -> Result<()> {
    let mut buffer: Vec<String> = Vec::new();
    let mut deadline: Option<Instant> = None;
    let mut source_open = true;

    loop {
        if !source_open && deadline.is_none() {
            debug!("line source closed; aggregator done");
            return Ok(());
        }

        let flush_timer = async move {
            match deadline {
                Some(at) => sleep_until(at).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                trace!(buffered = buffer.len(), "aggregator canceled");
                return Ok(());
            }

            line = lines.recv(), if source_open => match line {
                Some(line) => {
                    buffer.push(line);
                    deadline = Some(Instant::now() + settings.debounce);
                }
                None => source_open = false,
            },

            _ = flush_timer => {
                deadline = None;
                let stamp = now_timestamp(&settings.timestamp_format);
                let row = join_row(&stamp, &buffer, &settings.delimiter);
                trace!(lines = buffer.len(), "flushing row");
                buffer.clear();

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Ok(()),
                    sent = rows.send(row) => {
                        if sent.is_err() {
                            debug!("row sink closed; aggregator done");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

/// `stamp`, then each line, separated by `delimiter`.
pub fn join_row(stamp: &str, lines: &[String], delimiter: &str) -> String {
    let mut row = String::from(stamp);
    for line in lines {
        row.push_str(delimiter);
        row.push_str(line);
    }
    row
}

/// Local wall-clock time rendered with a strftime-style format.
pub fn now_timestamp(format: &str) -> String {
    let now = Local::now();
    let mut out = String::new();
    if write!(out, "{}", now.format(format)).is_err() {
        out.clear();
        out.push_str(&now.format(FALLBACK_TIMESTAMP_FORMAT).to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_starts_with_stamp_and_keeps_line_order() {
        let lines = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(join_row("12:00:00", &lines, "\t"), "12:00:00\ta\tb\tc");
    }

    #[test]
    fn default_timestamp_is_clock_shaped() {
        let stamp = now_timestamp("%H:%M:%S");
        assert_eq!(stamp.len(), 8);
        assert_eq!(stamp.matches(':').count(), 2);
    }
}
