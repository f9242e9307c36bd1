#![allow(dead_code)]

pub use hostwatch_test_utils::*;

use std::time::Duration;

use hostwatch::aggregate::AggregateSettings;

/// Tab-delimited settings with the given debounce.
pub fn aggregate_settings(debounce_ms: u64) -> AggregateSettings {
    AggregateSettings {
        debounce: Duration::from_millis(debounce_ms),
        ..AggregateSettings::default()
    }
}

/// Lines of a row, without its leading timestamp.
pub fn row_lines(row: &str) -> Vec<String> {
    row.split('\t').skip(1).map(str::to_string).collect()
}
