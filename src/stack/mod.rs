//! Weather file stacks: ordered, parsed histories for one location.
//!
//! Building a stack validates the requested date range, discovers matching
//! archive files, parses each one and keeps the successfully parsed records
//! in file-name (chronological) order.
//!
//! A file that fails to parse is logged, recorded in
//! [`WeatherFileStack::failures`] and left out of [`WeatherFileStack::files`].
//! An invalid date range, an empty discovery or a discovery in which no
//! file parses fails the whole build.

pub mod discovery;
pub mod loader;

#[cfg(test)]
pub mod tests;

use self::discovery::FileDiscovery;
use self::loader::load_files;

use crate::error::{ArchiveError, Result};
use crate::models::{TemperatureUnit, WeatherFileConfig};
use crate::series::{TemperaturePoint, TemperatureSeries};

use chrono::{Local, NaiveDate};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

/// Options controlling which files a stack covers and how they are loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackOptions {
    /// First date to include
    pub start_date: Option<NaiveDate>,
    /// Range end, exclusive when a start date is also given
    pub end_date: Option<NaiveDate>,
    /// Number of files parsed concurrently, 1 for sequential loading
    pub workers: usize,
    /// Show a progress bar while loading
    pub show_progress: bool,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            workers: 1,
            show_progress: false,
        }
    }
}

impl StackOptions {
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Set the worker count, 0 is treated as 1
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Check the date range before touching the filesystem
    pub fn validate(&self) -> Result<()> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start >= end => Err(ArchiveError::configuration(format!(
                "end_date ({}) is not after start_date ({})",
                end, start
            ))),
            _ => Ok(()),
        }
    }
}

/// A file that was discovered but could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Ordered collection of parsed weather files for one location
#[derive(Debug, Clone)]
pub struct WeatherFileStack {
    directory: PathBuf,
    location: String,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    files: Vec<WeatherFileConfig>,
    failures: Vec<ParseFailure>,
}

impl WeatherFileStack {
    /// Build a stack from the archive in `directory`
    pub async fn build(
        directory: impl AsRef<Path>,
        location: &str,
        options: StackOptions,
    ) -> Result<Self> {
        Self::build_as_of(directory, location, options, Local::now().date_naive()).await
    }

    /// Build a stack treating `today` as the current date
    pub async fn build_as_of(
        directory: impl AsRef<Path>,
        location: &str,
        options: StackOptions,
        today: NaiveDate,
    ) -> Result<Self> {
        options.validate()?;

        let start_time = Instant::now();
        let directory = directory.as_ref().to_path_buf();
        let discovery = FileDiscovery::new(&directory, location);
        let paths = discovery.discover(options.start_date, options.end_date, today)?;

        info!(
            "Loading {} weather files for '{}' with {} worker(s)",
            paths.len(),
            location,
            options.workers
        );

        let results = load_files(paths, location, options.workers, options.show_progress).await?;

        let mut files = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (path, result) in results {
            match result {
                Ok(record) => files.push(record),
                Err(e) => {
                    error!("File {} could not be parsed. Error: {}", path.display(), e);
                    failures.push(ParseFailure {
                        reason: failure_reason(&e),
                        path,
                    });
                }
            }
        }

        if files.is_empty() {
            return Err(ArchiveError::NoParsableFiles {
                location: location.to_string(),
                directory,
                failed: failures.len(),
            });
        }

        info!(
            "Loaded {} weather files for '{}' ({} skipped) in {:.2}s",
            files.len(),
            location,
            failures.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(Self {
            directory,
            location: location.to_string(),
            start_date: options.start_date,
            end_date: options.end_date,
            files,
            failures,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Parsed records in chronological order
    pub fn files(&self) -> &[WeatherFileConfig] {
        &self.files
    }

    /// Files that were discovered but skipped
    pub fn failures(&self) -> &[ParseFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeatherFileConfig> {
        self.files.iter()
    }

    /// Current temperature over time, optionally with the feels-like value
    pub fn temperature_series(&self, unit: TemperatureUnit, feelslike: bool) -> TemperatureSeries {
        let points = self
            .files
            .iter()
            .map(|file| {
                let weather = &file.current.weather;
                TemperaturePoint {
                    observed_at: file.current.obs_datetime_loc,
                    temperature: weather.temp.in_unit(unit),
                    feelslike: feelslike.then(|| weather.feelslike.in_unit(unit)),
                }
            })
            .collect();

        TemperatureSeries {
            location: self.location.clone(),
            unit,
            feelslike,
            points,
        }
    }
}

impl<'a> IntoIterator for &'a WeatherFileStack {
    type Item = &'a WeatherFileConfig;
    type IntoIter = std::slice::Iter<'a, WeatherFileConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

impl fmt::Display for WeatherFileStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WeatherFileStack for {}", self.location)?;
        if let Some(start) = self.start_date {
            write!(f, " from {}", start)?;
        }
        if let Some(end) = self.end_date {
            write!(f, " to {}", end)?;
        }
        Ok(())
    }
}

fn failure_reason(error: &ArchiveError) -> String {
    match error {
        ArchiveError::MalformedRecord { reason, .. } => reason.clone(),
        other => other.to_string(),
    }
}
