//! Shared helpers for integration tests

use chrono::{NaiveDate, NaiveDateTime};
use tracing_subscriber::EnvFilter;

/// Route engine logs through the test harness (`RUST_LOG=debug cargo test`)
#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .unwrap()
}
