//! Stack building tests

use super::*;
use crate::models::TemperatureUnit;
use crate::stack::{StackOptions, WeatherFileStack};

const BERLIN_STAMPS: &[&str] = &[
    "20230101-0900",
    "20230101-2100",
    "20230102-0900",
    "20230102-2100",
    "20230103-0900",
    "20230103-2100",
    "20230104-0900",
];

fn observation_times(stack: &WeatherFileStack) -> Vec<String> {
    stack
        .iter()
        .map(|f| f.current.obs_datetime_loc.unwrap().format("%Y%m%d-%H%M").to_string())
        .collect()
}

#[tokio::test]
async fn test_build_all_files_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let archive = create_test_archive(&temp_dir, "Berlin", BERLIN_STAMPS);
    archive_observation(&archive, "20230102-1200", "Hamburg");

    let stack = WeatherFileStack::build(&archive, "Berlin", StackOptions::default())
        .await
        .unwrap();

    assert_eq!(stack.len(), BERLIN_STAMPS.len());
    assert!(stack.failures().is_empty());
    assert_eq!(observation_times(&stack), BERLIN_STAMPS.to_vec());
    assert!(stack.iter().all(|f| f.location == "Berlin"));
    assert_eq!(stack.to_string(), "WeatherFileStack for Berlin");
}

#[tokio::test]
async fn test_build_with_both_bounds_is_end_exclusive() {
    let temp_dir = TempDir::new().unwrap();
    let archive = create_test_archive(&temp_dir, "Berlin", BERLIN_STAMPS);

    let options = StackOptions::default()
        .with_start_date(date(2023, 1, 2))
        .with_end_date(date(2023, 1, 4));
    let stack = WeatherFileStack::build(&archive, "Berlin", options)
        .await
        .unwrap();

    assert_eq!(
        observation_times(&stack),
        vec!["20230102-0900", "20230102-2100", "20230103-0900", "20230103-2100"]
    );
    assert_eq!(
        stack.to_string(),
        "WeatherFileStack for Berlin from 2023-01-02 to 2023-01-04"
    );
}

#[tokio::test]
async fn test_build_start_only_runs_through_today() {
    let temp_dir = TempDir::new().unwrap();
    let archive = create_test_archive(&temp_dir, "Berlin", BERLIN_STAMPS);

    let options = StackOptions::default().with_start_date(date(2023, 1, 3));
    let stack = WeatherFileStack::build_as_of(&archive, "Berlin", options, date(2023, 1, 4))
        .await
        .unwrap();

    assert_eq!(
        observation_times(&stack),
        vec!["20230103-0900", "20230103-2100", "20230104-0900"]
    );
    assert_eq!(stack.to_string(), "WeatherFileStack for Berlin from 2023-01-03");
}

#[tokio::test]
async fn test_build_end_only_starts_at_earliest_file() {
    let temp_dir = TempDir::new().unwrap();
    let archive = create_test_archive(&temp_dir, "Berlin", BERLIN_STAMPS);

    let options = StackOptions::default().with_end_date(date(2023, 1, 2));
    let stack = WeatherFileStack::build(&archive, "Berlin", options)
        .await
        .unwrap();

    assert_eq!(
        observation_times(&stack),
        vec!["20230101-0900", "20230101-2100", "20230102-0900", "20230102-2100"]
    );
    assert_eq!(stack.to_string(), "WeatherFileStack for Berlin to 2023-01-02");
}

#[tokio::test]
async fn test_parallel_build_preserves_file_order() {
    let temp_dir = TempDir::new().unwrap();
    let stamps: Vec<String> = (1..=28)
        .flat_map(|day| {
            ["0300", "0900", "1500", "2100"]
                .into_iter()
                .map(move |time| format!("202302{:02}-{}", day, time))
        })
        .collect();
    let stamp_refs: Vec<&str> = stamps.iter().map(String::as_str).collect();
    let archive = create_test_archive(&temp_dir, "Berlin", &stamp_refs);

    let sequential = WeatherFileStack::build(&archive, "Berlin", StackOptions::default())
        .await
        .unwrap();
    let parallel = WeatherFileStack::build(
        &archive,
        "Berlin",
        StackOptions::default().with_workers(4),
    )
    .await
    .unwrap();

    assert_eq!(parallel.len(), stamps.len());
    assert_eq!(observation_times(&parallel), stamps);
    assert_eq!(sequential.files(), parallel.files());
}

#[tokio::test]
async fn test_temperature_series() {
    let temp_dir = TempDir::new().unwrap();
    let archive = create_test_archive(&temp_dir, "Berlin", &BERLIN_STAMPS[..2]);

    let stack = WeatherFileStack::build(&archive, "Berlin", StackOptions::default())
        .await
        .unwrap();

    let celsius = stack.temperature_series(TemperatureUnit::Celsius, true);
    assert_eq!(celsius.location, "Berlin");
    assert!(celsius.feelslike);
    assert_eq!(celsius.points.len(), 2);
    assert_eq!(celsius.points[0].temperature, 18);
    assert_eq!(celsius.points[0].feelslike, Some(16));
    assert!(celsius.points[0].observed_at < celsius.points[1].observed_at);

    let fahrenheit = stack.temperature_series(TemperatureUnit::Fahrenheit, false);
    assert_eq!(fahrenheit.points[1].temperature, 64);
    assert_eq!(fahrenheit.points[1].feelslike, None);
    assert!(!fahrenheit.feelslike);
}
