use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncWriteExt, DuplexStream, duplex};
use tokio::sync::oneshot;

use hostwatch::errors::{HostwatchError, Result};
use hostwatch::exec::{Connector, RemoteSession, SessionExit};

const PIPE_CAPACITY: usize = 64 * 1024;

/// A connector that hands out scripted in-memory sessions instead of
/// spawning `ssh`.
///
/// Register a host with [`FakeConnector::host`] before the executor
/// connects; unknown hosts fail with a `Connect` error.
#[derive(Debug, Clone, Default)]
pub struct FakeConnector {
    pending: Arc<Mutex<HashMap<String, RemoteSession>>>,
    commands: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare a session for `host` and return the remote end of it.
    pub fn host(&self, host: &str) -> FakeRemote {
        let (stdout_reader, stdout_writer) = duplex(PIPE_CAPACITY);
        let (stderr_reader, stderr_writer) = duplex(PIPE_CAPACITY);
        let (exit_tx, exit_rx) = oneshot::channel::<Option<i32>>();
        let closed = Arc::new(AtomicBool::new(false));

        let guard = CloseGuard(Arc::clone(&closed));
        let exit: SessionExit = Box::pin(async move {
            let _guard = guard;
            Ok(exit_rx.await.unwrap_or(None))
        });

        let session = RemoteSession {
            stdout: Box::new(stdout_reader),
            stderr: Box::new(stderr_reader),
            exit,
        };
        self.pending.lock().unwrap().insert(host.to_string(), session);

        FakeRemote {
            stdout: stdout_writer,
            stderr: stderr_writer,
            exit: Some(exit_tx),
            closed,
        }
    }

    /// Every `(host, command)` pair passed to `connect`, in call order.
    pub fn commands(&self) -> Vec<(String, String)> {
        self.commands.lock().unwrap().clone()
    }
}

impl Connector for FakeConnector {
    fn connect(&self, host: &str, command: &str) -> Result<RemoteSession> {
        self.commands
            .lock()
            .unwrap()
            .push((host.to_string(), command.to_string()));

        self.pending
            .lock()
            .unwrap()
            .remove(host)
            .ok_or_else(|| HostwatchError::Connect {
                host: host.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no fake session registered"),
            })
    }
}

/// The "remote" side of a fake session.
pub struct FakeRemote {
    stdout: DuplexStream,
    stderr: DuplexStream,
    exit: Option<oneshot::Sender<Option<i32>>>,
    closed: Arc<AtomicBool>,
}

impl FakeRemote {
    /// Write one line to the data stream.
    pub async fn say(&mut self, line: &str) -> io::Result<()> {
        self.stdout.write_all(format!("{line}\n").as_bytes()).await
    }

    /// Write one line to the diagnostic stream.
    pub async fn complain(&mut self, line: &str) -> io::Result<()> {
        self.stderr.write_all(format!("{line}\n").as_bytes()).await
    }

    /// End the session with the given exit code.
    pub fn exit(&mut self, code: Option<i32>) {
        if let Some(tx) = self.exit.take() {
            let _ = tx.send(code);
        }
    }

    /// True once the executor has dropped the session.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

struct CloseGuard(Arc<AtomicBool>);

impl Drop for CloseGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}
