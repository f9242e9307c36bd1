// src/config/validate.rs

use chrono::format::{Item, StrftimeItems};

use crate::config::model::{ConfigFile, ConfigSection, RawConfigFile, SshSection};
use crate::errors::{HostwatchError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::HostwatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.ssh))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_config_section(&cfg.config)?;
    validate_ssh_section(&cfg.ssh)?;
    Ok(())
}

fn validate_config_section(section: &ConfigSection) -> Result<()> {
    validate_debounce_ms(section.debounce_ms)?;

    if section.line_buffer == 0 {
        return Err(HostwatchError::ConfigError(
            "[config].line_buffer must be >= 1 (got 0)".to_string(),
        ));
    }

    if section.delimiter.is_empty() {
        return Err(HostwatchError::ConfigError(
            "[config].delimiter must not be empty".to_string(),
        ));
    }

    validate_timestamp_format(&section.timestamp_format)
}

fn validate_ssh_section(section: &SshSection) -> Result<()> {
    validate_program(&section.program)
}

/// Shared with CLI override checks in [`crate::config::Settings`].
pub(crate) fn validate_debounce_ms(ms: u64) -> Result<()> {
    if ms == 0 {
        return Err(HostwatchError::ConfigError(
            "debounce_ms must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_program(program: &str) -> Result<()> {
    if program.trim().is_empty() {
        return Err(HostwatchError::ConfigError(
            "ssh program must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_timestamp_format(format: &str) -> Result<()> {
    if format.is_empty() || StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(HostwatchError::ConfigError(format!(
            "[config].timestamp_format is not a valid strftime format: {format:?}"
        )));
    }
    Ok(())
}
