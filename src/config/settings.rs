// src/config/settings.rs

use std::time::Duration;

use crate::aggregate::AggregateSettings;
use crate::cli::CliArgs;
use crate::config::model::ConfigFile;
use crate::config::validate::{validate_debounce_ms, validate_program};
use crate::errors::Result;
use crate::exec::{ExecutorSettings, SshConnector};
use crate::render::RenderSettings;

/// Everything a run needs, after CLI overrides are applied on top of the
/// config file (or its defaults).
#[derive(Debug, Clone)]
pub struct Settings {
    pub script: String,
    pub hosts: Vec<String>,
    pub debounce: Duration,
    pub pause: Duration,
    pub delimiter: String,
    pub timestamp_format: String,
    pub line_buffer: usize,
    pub ssh_program: String,
    pub ssh_args: Vec<String>,
}

impl Settings {
    pub fn resolve(args: &CliArgs, cfg: &ConfigFile) -> Result<Self> {
        let section = cfg.config();

        let debounce_ms = args.debounce_ms.unwrap_or(section.debounce_ms);
        validate_debounce_ms(debounce_ms)?;

        let ssh_program = args
            .ssh
            .clone()
            .unwrap_or_else(|| cfg.ssh().program.clone());
        validate_program(&ssh_program)?;

        Ok(Self {
            script: args.script.clone(),
            hosts: args.hosts.clone(),
            debounce: Duration::from_millis(debounce_ms),
            pause: Duration::from_secs(args.pause_secs.unwrap_or(section.pause_secs)),
            delimiter: section.delimiter.clone(),
            timestamp_format: section.timestamp_format.clone(),
            line_buffer: section.line_buffer,
            ssh_program,
            ssh_args: cfg.ssh().args.clone(),
        })
    }

    pub fn aggregate_settings(&self) -> AggregateSettings {
        AggregateSettings {
            debounce: self.debounce,
            delimiter: self.delimiter.clone(),
            timestamp_format: self.timestamp_format.clone(),
        }
    }

    pub fn executor_settings(&self) -> ExecutorSettings {
        ExecutorSettings {
            aggregate: self.aggregate_settings(),
            line_buffer: self.line_buffer,
        }
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            separator: self.delimiter.clone(),
            timestamp_format: self.timestamp_format.clone(),
        }
    }

    pub fn connector(&self) -> SshConnector {
        SshConnector::new(self.ssh_program.clone(), self.ssh_args.clone())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn cli_overrides_win_over_file_values() {
        let args = CliArgs::try_parse_from([
            "hostwatch",
            "--debounce-ms",
            "40",
            "--ssh",
            "/usr/local/bin/ssh",
            "uptime",
            "a",
        ])
        .unwrap();
        let settings = Settings::resolve(&args, &ConfigFile::default()).unwrap();

        assert_eq!(settings.debounce, Duration::from_millis(40));
        assert_eq!(settings.pause, Duration::from_secs(5));
        assert_eq!(settings.ssh_program, "/usr/local/bin/ssh");
        assert_eq!(settings.delimiter, "\t");
    }

    #[test]
    fn zero_debounce_override_is_rejected() {
        let args =
            CliArgs::try_parse_from(["hostwatch", "--debounce-ms", "0", "uptime", "a"]).unwrap();
        assert!(Settings::resolve(&args, &ConfigFile::default()).is_err());
    }
}
