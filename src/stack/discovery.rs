//! File discovery for weather file stacks
//!
//! Selects the archived files of one location, optionally bounded to a date
//! range, using glob patterns over the archive directory:
//!
//! ```text
//! archive/
//!   20230104-2312_Berlin.json
//!   20230105-0912_Berlin.json
//!   20230105-0912_Hamburg.json
//!   20230105-2112_Berlin.json
//! ```

use chrono::{Days, NaiveDate};
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::{FILE_DATE_FORMAT, WEATHER_FILE_EXTENSION};
use crate::error::{ArchiveError, Result};
use crate::naming::WeatherFileName;
use crate::temporal::{DateRange, date_range};

/// File discovery component for one location in an archive directory
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    directory: PathBuf,
    location: String,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(directory: impl Into<PathBuf>, location: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            location: location.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Discover files for the given bounds, sorted by name
    ///
    /// `today` closes a range that only has a start date.
    pub fn discover(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Vec<PathBuf>> {
        let mut files = match self.discovery_range(start_date, end_date, today)? {
            None => {
                debug!(
                    "Discovering all files for '{}' in {}",
                    self.location,
                    self.directory.display()
                );
                self.glob_files(&self.location_pattern())?
            }
            Some(range) => {
                debug!(
                    "Discovering files for '{}' from {} to {} (exclusive)",
                    self.location,
                    range.start(),
                    range.end()
                );
                let mut files = Vec::new();
                for date in range {
                    files.extend(self.glob_files(&self.date_pattern(date))?);
                }
                files
            }
        };

        files.sort();
        files.dedup();

        if files.is_empty() {
            return Err(ArchiveError::NoFilesFound {
                location: self.location.clone(),
                directory: self.directory.clone(),
            });
        }

        debug!("Found {} files for '{}'", files.len(), self.location);
        Ok(files)
    }

    /// Resolve the half-open date range to search, `None` when unbounded
    ///
    /// - start only: `[start, today]`
    /// - end only: `[earliest archived date, end]`
    /// - both: `[start, end)`
    pub fn discovery_range(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Option<DateRange>> {
        let range = match (start_date, end_date) {
            (None, None) => return Ok(None),
            (Some(start), Some(end)) => date_range(start, end),
            (Some(start), None) => date_range(start, day_after(today)),
            (None, Some(end)) => date_range(self.earliest_archived_date()?, day_after(end)),
        };
        Ok(Some(range))
    }

    /// Date of the earliest archived file for this location
    ///
    /// Taken from the timestamp prefix of the earliest matching file name.
    pub fn earliest_archived_date(&self) -> Result<NaiveDate> {
        self.glob_files(&self.location_pattern())?
            .iter()
            .filter_map(|path| WeatherFileName::from_path(path))
            .map(|name| name.date())
            .min()
            .ok_or_else(|| ArchiveError::NoFilesFound {
                location: self.location.clone(),
                directory: self.directory.clone(),
            })
    }

    /// Pattern matching every archived file of the location
    fn location_pattern(&self) -> String {
        self.pattern_in_directory(&format!(
            "*_{}.{}",
            Pattern::escape(&self.location),
            WEATHER_FILE_EXTENSION
        ))
    }

    /// Pattern matching the location's files observed on `date`
    fn date_pattern(&self, date: NaiveDate) -> String {
        self.pattern_in_directory(&format!(
            "{}*_{}.{}",
            date.format(FILE_DATE_FORMAT),
            Pattern::escape(&self.location),
            WEATHER_FILE_EXTENSION
        ))
    }

    fn pattern_in_directory(&self, file_pattern: &str) -> String {
        let directory = Pattern::escape(&self.directory.to_string_lossy());
        Path::new(&directory)
            .join(file_pattern)
            .to_string_lossy()
            .into_owned()
    }

    /// Run a glob and keep files that belong to this location
    ///
    /// `*_Berlin.json` would also match `..._New_Berlin.json`, so matches are
    /// checked against the naming convention.
    fn glob_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in glob::glob(pattern)? {
            match entry {
                Ok(path) => {
                    if self.belongs_to_location(&path) {
                        files.push(path);
                    } else {
                        debug!("Skipping file of another location: {}", path.display());
                    }
                }
                Err(e) => warn!("Unreadable archive entry: {}", e),
            }
        }

        Ok(files)
    }

    fn belongs_to_location(&self, path: &Path) -> bool {
        path.is_file()
            && WeatherFileName::from_path(path).is_some_and(|name| name.location == self.location)
    }
}

fn day_after(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}
