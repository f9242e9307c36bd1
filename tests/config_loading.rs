// tests/config_loading.rs

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use tempfile::NamedTempFile;

use hostwatch::cli::CliArgs;
use hostwatch::config::{Settings, load_and_validate, load_optional};
use hostwatch::errors::HostwatchError;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn full_file_is_applied() {
    let file = config_file(
        r#"
[config]
debounce_ms = 100
pause_secs = 2
delimiter = " | "
timestamp_format = "%H:%M"
line_buffer = 16

[ssh]
program = "/usr/bin/ssh"
args = ["-o", "BatchMode=yes"]
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    let args = CliArgs::try_parse_from(["hostwatch", "uptime", "a"]).unwrap();
    let settings = Settings::resolve(&args, &cfg).unwrap();

    assert_eq!(settings.debounce, Duration::from_millis(100));
    assert_eq!(settings.pause, Duration::from_secs(2));
    assert_eq!(settings.delimiter, " | ");
    assert_eq!(settings.timestamp_format, "%H:%M");
    assert_eq!(settings.line_buffer, 16);
    assert_eq!(
        settings.connector().argv("a", "true"),
        vec!["/usr/bin/ssh", "-o", "BatchMode=yes", "a", "--", "true"]
    );
}

#[test]
fn empty_file_means_defaults() {
    let file = config_file("");
    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.config().debounce_ms, 250);
    assert_eq!(cfg.config().pause_secs, 5);
    assert_eq!(cfg.ssh().program, "ssh");
}

#[test]
fn no_file_means_defaults() {
    let cfg = load_optional(None).unwrap();
    assert_eq!(cfg.config().delimiter, "\t");
}

#[test]
fn unknown_keys_are_rejected() {
    let file = config_file(
        r#"
[config]
debounce = 100
"#,
    );

    match load_and_validate(file.path()) {
        Err(HostwatchError::TomlError(_)) => {}
        other => panic!("expected TomlError, got {other:?}"),
    }
}

#[test]
fn invalid_values_return_config_error() {
    let file = config_file(
        r#"
[config]
line_buffer = 0
"#,
    );

    match load_and_validate(file.path()) {
        Err(HostwatchError::ConfigError(msg)) => assert!(msg.contains("line_buffer")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    match load_optional(Some("/definitely/not/here/hostwatch.toml")) {
        Err(HostwatchError::IoError(_)) => {}
        other => panic!("expected IoError, got {other:?}"),
    }
}

#[tokio::test]
async fn run_names_the_config_file_it_could_not_load() {
    let path = "/definitely/not/here/hostwatch.toml";
    let args = CliArgs::try_parse_from(["hostwatch", "--config", path, "uptime", "a"]).unwrap();

    match hostwatch::run(args).await {
        Err(HostwatchError::Other(err)) => {
            assert_eq!(err.to_string(), format!("loading config {path}"));
            assert!(matches!(
                err.downcast_ref::<HostwatchError>(),
                Some(HostwatchError::IoError(_))
            ));
        }
        other => panic!("expected a config loading error, got {other:?}"),
    }
}

#[tokio::test]
async fn run_keeps_the_validation_error_behind_the_context() {
    let file = config_file("[config]\ndebounce_ms = 0\n");
    let path = file.path().to_str().unwrap();
    let args = CliArgs::try_parse_from(["hostwatch", "--config", path, "uptime", "a"]).unwrap();

    match hostwatch::run(args).await {
        Err(HostwatchError::Other(err)) => {
            assert!(err.to_string().contains(path));
            assert!(matches!(
                err.downcast_ref::<HostwatchError>(),
                Some(HostwatchError::ConfigError(_))
            ));
        }
        other => panic!("expected a config loading error, got {other:?}"),
    }
}
