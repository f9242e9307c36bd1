// src/logging.rs

//! Diagnostics go to stderr so they never interleave with the dashboard on
//! stdout.
//!
//! `--log-level` wins. Without it, `HOSTWATCH_LOG` is read as an `EnvFilter`
//! directive list (`debug`, `hostwatch::exec=trace,warn`, ...). An unset or
//! unparsable variable means `info`.

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "HOSTWATCH_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the stderr subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> anyhow::Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = log_filter(cli_level, env.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}

fn log_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(directive(level));
    }
    env.map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn flag_beats_environment() {
        let filter = log_filter(Some(LogLevel::Warn), Some("trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn environment_takes_directive_lists() {
        let filter = log_filter(None, Some(" hostwatch=trace,warn "));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn unset_blank_or_broken_environment_means_info() {
        for env in [None, Some(""), Some("hostwatch=loudest")] {
            let filter = log_filter(None, env);
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO), "env {env:?}");
        }
    }
}
