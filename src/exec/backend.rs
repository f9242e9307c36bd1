// src/exec/backend.rs

//! Pluggable connection backend.
//!
//! The executor talks to a [`Connector`] instead of spawning `ssh` directly.
//! Production uses [`SshConnector`]; tests supply in-memory sessions.

use std::fmt::Debug;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::process::Stdio;

use tokio::io::AsyncRead;
use tokio::process::Command;
use tracing::debug;

use crate::errors::{HostwatchError, Result};

/// Resolves to the remote exit code (`None` when killed by a signal).
///
/// Dropping it must tear the remote side down.
pub type SessionExit = Pin<Box<dyn Future<Output = io::Result<Option<i32>>> + Send>>;

/// A live remote command.
pub struct RemoteSession {
    /// Data stream: every line becomes part of a dashboard row.
    pub stdout: Box<dyn AsyncRead + Send + Unpin>,
    /// Diagnostic stream: logged, never shown on the dashboard.
    pub stderr: Box<dyn AsyncRead + Send + Unpin>,
    pub exit: SessionExit,
}

impl Debug for RemoteSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSession").finish_non_exhaustive()
    }
}

/// Trait abstracting how a command is started on a host.
pub trait Connector: Send + Sync + Debug {
    fn connect(&self, host: &str, command: &str) -> Result<RemoteSession>;
}

/// Reaches hosts with `ssh` (or a compatible program).
#[derive(Debug, Clone)]
pub struct SshConnector {
    program: String,
    args: Vec<String>,
}

impl SshConnector {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Full argument vector, program first.
    pub fn argv(&self, host: &str, command: &str) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 4);
        argv.push(self.program.clone());
        argv.extend(self.args.iter().cloned());
        argv.push(host.to_string());
        argv.push("--".to_string());
        argv.push(command.to_string());
        argv
    }
}

impl Default for SshConnector {
    fn default() -> Self {
        Self::new("ssh", Vec::new())
    }
}

impl Connector for SshConnector {
    fn connect(&self, host: &str, command: &str) -> Result<RemoteSession> {
        let connect_err = |source: io::Error| HostwatchError::Connect {
            host: host.to_string(),
            source,
        };

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(host)
            .arg("--")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(connect_err)?;
        debug!(host, pid = child.id(), "ssh process spawned");

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| connect_err(io::Error::other("stdout was not captured")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| connect_err(io::Error::other("stderr was not captured")))?;

        // The child moves into the future; dropping the future kills it.
        let exit: SessionExit = Box::pin(async move {
            let status = child.wait().await?;
            Ok(status.code())
        });

        Ok(RemoteSession {
            stdout: Box::new(stdout),
            stderr: Box::new(stderr),
            exit,
        })
    }
}
