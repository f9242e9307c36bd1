// src/lib.rs

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod render;

use std::sync::Arc;

use anyhow::Context;
use tokio::io::AsyncWrite;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{Settings, load_optional};
use crate::engine::Group;
use crate::errors::Result;
use crate::exec::{Connector, execute, remote_loop_command};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - one executor actor per host (session + line scanners + aggregator)
/// - the dashboard renderer actor
/// - the interrupt actor (Ctrl-C / SIGTERM)
///
/// It only returns once every actor has stopped, with the error of the
/// actor that stopped first.
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_optional(args.config.as_deref()).with_context(|| {
        format!("loading config {}", args.config.as_deref().unwrap_or_default())
    })?;
    let settings = Settings::resolve(&args, &cfg)?;

    if args.dry_run {
        print_dry_run(&settings);
        return Ok(());
    }

    info!("running script: {:?}", settings.script);
    let plural = if settings.hosts.len() > 1 { "s" } else { "" };
    info!(
        "{} host{}: {}",
        settings.hosts.len(),
        plural,
        settings.hosts.join(" ")
    );

    let connector: Arc<dyn Connector> = Arc::new(settings.connector());
    let mut group = dashboard_group(&settings, connector, tokio::io::stdout());

    {
        let token = CancellationToken::new();
        let stop = token.clone();
        group.add("interrupt", engine::interrupt(token), move |_| stop.cancel());
    }

    info!("connecting and starting...");
    group.run().await
}

/// Build the actor group for one dashboard: an executor per host feeding the
/// renderer, which draws to `sink`.
///
/// Hosts map 1:1 to row channels; row order on screen is host order.
pub fn dashboard_group<W>(settings: &Settings, connector: Arc<dyn Connector>, sink: W) -> Group
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let command: Arc<str> = Arc::from(remote_loop_command(&settings.script, settings.pause));
    debug!(command = %command, "remote command");

    let mut group = Group::new();
    let mut row_receivers = Vec::with_capacity(settings.hosts.len());

    for host in &settings.hosts {
        let (rows_tx, rows_rx) = mpsc::channel::<String>(1);
        row_receivers.push(rows_rx);

        let token = CancellationToken::new();
        let stop = token.clone();
        group.add(
            format!("execute {host}"),
            execute(
                token,
                host.clone(),
                Arc::clone(&command),
                Arc::clone(&connector),
                rows_tx,
                settings.executor_settings(),
            ),
            move |_| stop.cancel(),
        );
    }

    {
        let token = CancellationToken::new();
        let stop = token.clone();
        group.add(
            "render",
            render::render(token, row_receivers, sink, settings.render_settings()),
            move |_| stop.cancel(),
        );
    }

    group
}

/// Print the resolved settings and the exact command line per host.
fn print_dry_run(settings: &Settings) {
    let command = remote_loop_command(&settings.script, settings.pause);
    let connector = settings.connector();

    println!("hostwatch dry-run");
    println!("  debounce = {:?}", settings.debounce);
    println!("  pause = {:?}", settings.pause);
    println!("  delimiter = {:?}", settings.delimiter);
    println!("  timestamp_format = {:?}", settings.timestamp_format);
    println!("  line_buffer = {}", settings.line_buffer);
    println!();

    println!("hosts ({}):", settings.hosts.len());
    for host in &settings.hosts {
        println!("  - {host}");
        println!("      argv: {:?}", connector.argv(host, &command));
    }

    debug!("dry-run complete (no connections)");
}
