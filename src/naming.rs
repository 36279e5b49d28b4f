//! Archive file naming convention.
//!
//! Every archived observation is stored as `YYYYMMDD-HHMM_<location>.json`
//! where the prefix is the local observation timestamp. The crawler writes
//! names with [`weather_file_name`]; discovery reads them back with
//! [`WeatherFileName::parse`].

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::constants::{
    FILE_DATE_FORMAT, FILE_TIMESTAMP_FORMAT, WEATHER_FILE_EXTENSION, WEATHER_FILE_NAME_PATTERN,
};

static WEATHER_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(WEATHER_FILE_NAME_PATTERN).expect("weather file name pattern is valid")
});

/// Components of an archived file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherFileName {
    pub timestamp: NaiveDateTime,
    pub location: String,
}

impl WeatherFileName {
    /// Parse a bare file name, `None` if it breaks the convention
    pub fn parse(file_name: &str) -> Option<Self> {
        let captures = WEATHER_FILE_NAME.captures(file_name)?;
        let date = NaiveDate::parse_from_str(&captures[1], FILE_DATE_FORMAT).ok()?;
        let time = NaiveTime::parse_from_str(&captures[2], "%H%M").ok()?;

        Some(Self {
            timestamp: date.and_time(time),
            location: captures[3].to_string(),
        })
    }

    /// Parse the file name component of `path`
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(Self::parse)
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Build the archive file name for an observation
pub fn weather_file_name(observed_at: NaiveDateTime, location: &str) -> String {
    format!(
        "{}_{}.{}",
        observed_at.format(FILE_TIMESTAMP_FORMAT),
        location,
        WEATHER_FILE_EXTENSION
    )
}

/// Location embedded in an arbitrary `*_<location>.json` file name
///
/// This is looser than [`WeatherFileName::parse`]: the location is the text
/// between the first underscore and the extension, whatever the prefix.
pub fn location_from_file_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let (_, location) = stem.split_once('_')?;
    (!location.is_empty()).then(|| location.to_string())
}
