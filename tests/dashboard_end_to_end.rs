// tests/dashboard_end_to_end.rs

mod common;
use crate::common::{FakeConnector, SharedSink, init_tracing, wait_until, with_timeout};

use std::error::Error;
use std::sync::Arc;

use clap::Parser;

use hostwatch::cli::CliArgs;
use hostwatch::config::{ConfigFile, Settings};
use hostwatch::dashboard_group;
use hostwatch::errors::HostwatchError;
use hostwatch::exec::{Connector, remote_loop_command};

type TestResult = Result<(), Box<dyn Error>>;

fn settings(hosts: &[&str]) -> Settings {
    let mut argv = vec!["hostwatch", "--debounce-ms", "20", "uptime"];
    argv.extend_from_slice(hosts);
    let args = CliArgs::try_parse_from(argv).expect("valid test args");
    Settings::resolve(&args, &ConfigFile::default()).expect("valid test settings")
}

#[tokio::test]
async fn one_row_per_host_and_first_failure_ends_the_run() -> TestResult {
    init_tracing();

    let connector = FakeConnector::new();
    let mut web = connector.host("web-1");
    let mut db = connector.host("db-1");
    let sink = SharedSink::new();

    let settings = settings(&["web-1", "db-1"]);
    let group = dashboard_group(
        &settings,
        Arc::new(connector.clone()) as Arc<dyn Connector>,
        sink.clone(),
    );
    assert_eq!(group.len(), 3, "two executors and one renderer");

    let run = tokio::spawn(group.run());

    db.say("up 9 days").await?;
    web.say("up 3 days").await?;
    web.complain("ssh: warning: something").await?;

    wait_until(|| {
        sink.last_frame()
            .is_some_and(|f| f.contains("up 3 days") && f.contains("up 9 days"))
    })
    .await;

    let frame = sink.last_frame().ok_or("no frame")?;
    let lines: Vec<&str> = frame.lines().collect();
    assert!(lines[0].ends_with("up 3 days"), "web-1 is the first row: {frame:?}");
    assert!(lines[1].ends_with("up 9 days"), "db-1 is the second row: {frame:?}");
    assert!(!sink.contents().contains("something"));

    let command = remote_loop_command("uptime", settings.pause);
    let mut commands = connector.commands();
    commands.sort();
    assert_eq!(
        commands,
        vec![
            ("db-1".to_string(), command.clone()),
            ("web-1".to_string(), command),
        ]
    );

    web.exit(Some(255));

    match with_timeout(run).await? {
        Err(HostwatchError::SessionEnded { host, .. }) => assert_eq!(host, "web-1"),
        other => panic!("expected web-1's session end, got {other:?}"),
    }
    assert!(db.is_closed(), "the other host was torn down too");
    Ok(())
}

#[tokio::test]
async fn unreachable_host_stops_everything() -> TestResult {
    init_tracing();

    let connector = FakeConnector::new();
    let ok = connector.host("web-1");
    let sink = SharedSink::new();

    let group = dashboard_group(
        &settings(&["web-1", "nowhere"]),
        Arc::new(connector) as Arc<dyn Connector>,
        sink,
    );

    match with_timeout(group.run()).await {
        Err(HostwatchError::Connect { host, .. }) => assert_eq!(host, "nowhere"),
        other => panic!("expected Connect error, got {other:?}"),
    }
    assert!(ok.is_closed());
    Ok(())
}
