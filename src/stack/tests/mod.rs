//! Integration tests for stack building
//!
//! Tests discovery, loading and failure handling against temporary archive
//! directories filled with fixture documents.

use crate::parser::tests::{sample_document, write_weather_file};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

mod build_tests;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Helper to write a valid archived observation for `location`
///
/// `stamp` is the `YYYYMMDD-HHMM` file name prefix.
pub fn archive_observation(dir: &Path, stamp: &str, location: &str) -> PathBuf {
    let obs = format!(
        "{}-{}-{} {}:{} {}",
        &stamp[0..4],
        &stamp[4..6],
        &stamp[6..8],
        twelve_hour(&stamp[9..11]),
        &stamp[11..13],
        if &stamp[9..11] < "12" { "AM" } else { "PM" }
    );
    write_weather_file(
        dir,
        &format!("{}_{}.json", stamp, location),
        &sample_document(&obs),
    )
}

fn twelve_hour(hour: &str) -> String {
    let hour: u32 = hour.parse().unwrap();
    let twelve = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{:02}", twelve)
}

/// Helper to create an archive directory with the given observation stamps
pub fn create_test_archive(temp_dir: &TempDir, location: &str, stamps: &[&str]) -> PathBuf {
    let archive = temp_dir.path().join("weatherfiles");
    std::fs::create_dir_all(&archive).unwrap();
    for stamp in stamps {
        archive_observation(&archive, stamp, location);
    }
    archive
}
