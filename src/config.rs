//! Configuration management and validation.
//!
//! The crawler reads a JSON configuration file listing the locations to
//! fetch and where to archive them:
//!
//! ```json
//! {
//!   "locations": ["Berlin", "Hamburg"],
//!   "weatherfiledir": "data/weatherfiles",
//!   "logfilepath": "data/logs/crawler.log"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::constants::{APP_DIR_NAME, DATE_FORMAT, DEFAULT_BASE_URL, DEFAULT_CONFIG_FILE};
use crate::error::{ArchiveError, Result};
use crate::temporal::{parse_or_absent, validate};
use chrono::NaiveDate;

/// Configuration for the weather crawler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Query strings passed to the weather API, also used in file names
    pub locations: Vec<String>,

    /// Directory receiving one JSON file per observation
    pub weatherfiledir: PathBuf,

    /// Append-only crawl log
    pub logfilepath: PathBuf,

    /// Weather API endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds, no timeout when absent
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl CrawlerConfig {
    pub fn new(
        locations: Vec<String>,
        weatherfiledir: impl Into<PathBuf>,
        logfilepath: impl Into<PathBuf>,
    ) -> Self {
        Self {
            locations,
            weatherfiledir: weatherfiledir.into(),
            logfilepath: logfilepath.into(),
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading crawler configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            ArchiveError::configuration(format!(
                "Could not read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ArchiveError::configuration(format!(
                "Invalid configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration path: `./config.json` if present, otherwise
    /// `<user config dir>/wttr-archive/config.json`
    pub fn default_config_path() -> PathBuf {
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return local;
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(DEFAULT_CONFIG_FILE))
            .unwrap_or(local)
    }

    pub fn validate(&self) -> Result<()> {
        if self.locations.is_empty() {
            return Err(ArchiveError::configuration("No locations configured"));
        }
        if let Some(location) = self
            .locations
            .iter()
            .find(|l| l.trim().is_empty() || l.contains(['/', '\\']))
        {
            return Err(ArchiveError::configuration(format!(
                "Location '{}' cannot be used in a file name",
                location
            )));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ArchiveError::configuration(
                "request_timeout_secs must be greater than zero",
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }
}

/// Parse a user-supplied `YYYY-MM-DD` range boundary
///
/// A malformed boundary is a configuration error, not a data problem.
pub fn parse_boundary_date(name: &str, text: &str) -> Result<NaiveDate> {
    if !validate(text, DATE_FORMAT) {
        return Err(ArchiveError::configuration(format!(
            "{} should have the format 'YYYY-MM-DD', got '{}'",
            name, text
        )));
    }
    parse_or_absent(text, DATE_FORMAT).ok_or_else(|| {
        ArchiveError::configuration(format!("{} '{}' is not a calendar date", name, text))
    })
}
