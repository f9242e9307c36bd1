// src/exec/mod.rs

//! Remote execution layer.
//!
//! - [`backend`]: the [`Connector`] trait and the production [`SshConnector`].
//! - [`remote_loop`]: the shell loop that re-runs the script on the host.
//! - [`lines`]: scanners for the data and diagnostic streams.
//! - [`executor`]: the per-host actor tying a session to its aggregator.

pub mod backend;
pub mod executor;
pub mod lines;
pub mod remote_loop;

pub use backend::{Connector, RemoteSession, SessionExit, SshConnector};
pub use executor::{ExecutorSettings, execute};
pub use remote_loop::remote_loop_command;
