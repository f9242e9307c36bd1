// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `hostwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hostwatch",
    version,
    about = "Run one command repeatedly on many hosts and show the latest output as a live table.",
    long_about = None,
    after_help = "Example: hostwatch 'hostname ; du -hs $HOME ; ps aux|grep system|head -n1' host1 host2"
)]
pub struct CliArgs {
    /// Script run on every host, over and over.
    #[arg(value_name = "SCRIPT")]
    pub script: String,

    /// Hosts to connect to. Rows are drawn in this order.
    #[arg(value_name = "HOST", required = true, num_args = 1..)]
    pub hosts: Vec<String>,

    /// Optional TOML file with tuning values (`[config]` and `[ssh]`).
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Quiet period, in milliseconds, before buffered lines become a row.
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Seconds the remote loop sleeps between script runs.
    #[arg(long, value_name = "SECS")]
    pub pause_secs: Option<u64>,

    /// Program used to reach the hosts.
    #[arg(long, value_name = "PROGRAM")]
    pub ssh: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `HOSTWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print resolved settings and remote commands, but don't connect.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
