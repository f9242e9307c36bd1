// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostwatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("connecting to {host}: {source}")]
    Connect {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("session on {host} ended ({status})")]
    SessionEnded { host: String, status: String },

    #[error("received signal {0}")]
    Signal(String),

    #[error("canceled")]
    Canceled,

    #[error("actor panicked: {0}")]
    ActorPanicked(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HostwatchError {
    /// True when the error only records that the actor was asked to stop.
    pub fn is_canceled(&self) -> bool {
        matches!(self, HostwatchError::Canceled)
    }
}

pub type Result<T> = std::result::Result<T, HostwatchError>;
