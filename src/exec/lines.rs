// src/exec/lines.rs

//! Line scanners for the two remote streams.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Longest line kept, in bytes. Anything past it up to the next newline is
/// dropped.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Forward every line of `reader` to `tx`, in order, until EOF or until the
/// receiver goes away.
pub async fn forward_lines<R>(reader: R, tx: mpsc::Sender<String>, host: String)
where
    R: AsyncRead + Unpin,
{
    let mut scanner = LineScanner::new(BufReader::new(reader), host);
    loop {
        match scanner.next_line().await {
            Ok(Some(line)) => {
                if tx.send(line).await.is_err() {
                    debug!(host = %scanner.host, "line receiver closed; stop reading data stream");
                    return;
                }
            }
            Ok(None) => {
                debug!(host = %scanner.host, "data stream closed");
                return;
            }
            Err(err) => {
                debug!(host = %scanner.host, error = %err, "data stream read failed");
                return;
            }
        }
    }
}

/// Log every line of the diagnostic stream at `warn`. Nothing is forwarded.
pub async fn log_lines<R>(reader: R, host: String)
where
    R: AsyncRead + Unpin,
{
    let mut scanner = LineScanner::new(BufReader::new(reader), host);
    loop {
        match scanner.next_line().await {
            Ok(Some(line)) => warn!(host = %scanner.host, "error: {line}"),
            Ok(None) => return,
            Err(err) => {
                debug!(host = %scanner.host, error = %err, "diagnostic stream read failed");
                return;
            }
        }
    }
}

/// Splits one host stream into text lines.
///
/// Terminators (`\n`, `\r\n`) are stripped, invalid UTF-8 is replaced, and
/// lines longer than the limit are truncated.
pub struct LineScanner<R> {
    reader: R,
    buf: Vec<u8>,
    limit: usize,
    host: String,
}

impl<R> LineScanner<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(reader: R, host: impl Into<String>) -> Self {
        Self::with_limit(reader, host, MAX_LINE_BYTES)
    }

    pub fn with_limit(reader: R, host: impl Into<String>, limit: usize) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            limit: limit.max(1),
            host: host.into(),
        }
    }

    /// Next line, or `None` at EOF.
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        let read = (&mut self.reader)
            .take(self.limit as u64)
            .read_until(b'\n', &mut self.buf)
            .await?;
        if read == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        } else if read == self.limit {
            let dropped = self.skip_rest_of_line().await?;
            if dropped > 0 {
                warn!(host = %self.host, limit = self.limit, dropped, "line too long; truncated");
            }
            if self.buf.last() == Some(&b'\r') && dropped == 0 {
                self.buf.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }

    /// Discard bytes up to and including the next newline. Returns how many
    /// bytes were dropped, terminator excluded.
    async fn skip_rest_of_line(&mut self) -> io::Result<usize> {
        let mut dropped = 0;
        loop {
            let (consume, done) = {
                let available = self.reader.fill_buf().await?;
                if available.is_empty() {
                    return Ok(dropped);
                }
                match available.iter().position(|&b| b == b'\n') {
                    Some(at) => {
                        dropped += at;
                        (at + 1, true)
                    }
                    None => {
                        dropped += available.len();
                        (available.len(), false)
                    }
                }
            };
            self.reader.consume(consume);
            if done {
                return Ok(dropped);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn collect<R: AsyncBufRead + Unpin>(mut scanner: LineScanner<R>) -> Vec<String> {
        let mut got = Vec::new();
        while let Some(line) = scanner.next_line().await.unwrap() {
            got.push(line);
        }
        got
    }

    #[tokio::test]
    async fn strips_terminators_and_keeps_last_partial_line() {
        let scanner = LineScanner::new(&b"one\r\ntwo\nthree"[..], "h");
        assert_eq!(collect(scanner).await, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn forwards_in_order() {
        let (tx, mut rx) = mpsc::channel(8);
        forward_lines(&b"a\nb\nc\n"[..], tx, "h".to_string()).await;

        let mut got = Vec::new();
        while let Some(line) = rx.recv().await {
            got.push(line);
        }
        assert_eq!(got, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced() {
        let mut scanner = LineScanner::new(&b"ok\xff\n"[..], "h");
        let line = scanner.next_line().await.unwrap().unwrap();
        assert_eq!(line, "ok\u{fffd}");
    }

    #[tokio::test]
    async fn long_line_is_truncated_and_the_next_line_survives() {
        let scanner = LineScanner::with_limit(&b"abcdefgh\nxy\n"[..], "h", 4);
        assert_eq!(collect(scanner).await, vec!["abcd", "xy"]);
    }

    #[tokio::test]
    async fn line_exactly_at_the_limit_is_kept_whole() {
        let scanner = LineScanner::with_limit(&b"abcd\nxy"[..], "h", 4);
        assert_eq!(collect(scanner).await, vec!["abcd", "xy"]);
    }

    #[tokio::test]
    async fn endless_line_is_bounded() {
        let endless = vec![b'z'; 10 * 1024];
        let mut scanner = LineScanner::with_limit(&endless[..], "h", 1024);
        let line = scanner.next_line().await.unwrap().unwrap();
        assert_eq!(line.len(), 1024);
        assert!(scanner.next_line().await.unwrap().is_none());
    }
}
