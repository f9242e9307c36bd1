// src/config/mod.rs

//! Configuration for hostwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load an optional config file from disk (`loader.rs`).
//! - Validate values (`validate.rs`).
//! - Merge file values and CLI overrides into runtime [`Settings`] (`settings.rs`).

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_optional};
pub use model::{ConfigFile, ConfigSection, RawConfigFile, SshSection};
pub use settings::Settings;
