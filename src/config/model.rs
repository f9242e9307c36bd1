// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// debounce_ms = 250
/// pause_secs = 5
/// delimiter = "\t"
/// timestamp_format = "%H:%M:%S"
///
/// [ssh]
/// program = "ssh"
/// args = ["-o", "BatchMode=yes"]
/// ```
///
/// All sections are optional; an empty file is the same as no file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub ssh: SshSection,
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`
/// (or [`ConfigFile::default`]).
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    config: ConfigSection,
    ssh: SshSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, ssh: SshSection) -> Self {
        Self { config, ssh }
    }

    pub fn config(&self) -> &ConfigSection {
        &self.config
    }

    pub fn ssh(&self) -> &SshSection {
        &self.ssh
    }
}

/// `[config]` section: timing and formatting of rows.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// Quiet period after the last line before a row is emitted.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Seconds the remote shell sleeps between script invocations.
    #[serde(default = "default_pause_secs")]
    pub pause_secs: u64,

    /// Joins the lines of one row. Also used as the table column separator.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// chrono format string for row timestamps and the footer.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Capacity of the per-host channel between line scanner and aggregator.
    #[serde(default = "default_line_buffer")]
    pub line_buffer: usize,
}

fn default_debounce_ms() -> u64 {
    250
}

fn default_pause_secs() -> u64 {
    5
}

fn default_delimiter() -> String {
    "\t".to_string()
}

fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}

fn default_line_buffer() -> usize {
    64
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            pause_secs: default_pause_secs(),
            delimiter: default_delimiter(),
            timestamp_format: default_timestamp_format(),
            line_buffer: default_line_buffer(),
        }
    }
}

/// `[ssh]` section: how a host is reached.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SshSection {
    #[serde(default = "default_ssh_program")]
    pub program: String,

    /// Extra arguments placed between the program and the host.
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_ssh_program() -> String {
    "ssh".to_string()
}

impl Default for SshSection {
    fn default() -> Self {
        Self {
            program: default_ssh_program(),
            args: Vec::new(),
        }
    }
}
