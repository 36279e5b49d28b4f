//! Weather crawler writing the archive.
//!
//! For every configured location the crawler fetches the current JSON
//! weather document, stores it as `YYYYMMDD-HHMM_<location>.json` in the
//! archive directory and appends one line per outcome to the crawl log.
//! A failing location never stops the crawl.

use chrono::{Local, NaiveDateTime};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::config::CrawlerConfig;
use crate::constants::{JSON_FORMAT_QUERY, LOG_TIMESTAMP_FORMAT, OBS_DATETIME_FORMAT, keys};
use crate::error::{ArchiveError, Result};
use crate::naming::weather_file_name;
use crate::temporal::parse_or_absent;

/// Stage at which a location failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlFailure {
    Get,
    Save,
}

impl fmt::Display for CrawlFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrawlFailure::Get => write!(f, "GET_ERROR"),
            CrawlFailure::Save => write!(f, "SAVE_ERROR"),
        }
    }
}

/// Outcome of one crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// File names written, in location order
    pub saved: Vec<String>,
    /// Locations that failed, with the failing stage
    pub failed: Vec<(String, CrawlFailure)>,
}

impl CrawlReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Log line for a stored document
pub fn success_line(now: NaiveDateTime, file_name: &str) -> String {
    format!(
        "+ {}: successfully saved {}.\n",
        now.format(LOG_TIMESTAMP_FORMAT),
        file_name
    )
}

/// Log line for a failed location
pub fn failure_line(
    now: NaiveDateTime,
    location: &str,
    failure: CrawlFailure,
    error: &dyn fmt::Display,
) -> String {
    format!(
        "! {} Location '{}': {}: {}\n",
        now.format(LOG_TIMESTAMP_FORMAT),
        location,
        failure,
        error
    )
}

pub struct WeatherCrawler {
    config: CrawlerConfig,
    client: Client,
}

impl WeatherCrawler {
    /// Create a crawler, making sure the archive and log directories exist
    pub fn new(config: CrawlerConfig) -> Result<Self> {
        config.validate()?;

        std::fs::create_dir_all(&config.weatherfiledir)?;
        if let Some(parent) = config
            .logfilepath
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            ArchiveError::configuration(format!("Could not create HTTP client: {}", e))
        })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Fetch and store every configured location once
    ///
    /// Only a failure to write the crawl log itself aborts the run.
    pub async fn crawl(&self) -> Result<CrawlReport> {
        let mut report = CrawlReport::default();

        for location in &self.config.locations {
            let document = match self.fetch(location).await {
                Ok(document) => document,
                Err(ArchiveError::Fetch { source, .. }) => {
                    warn!("Fetching weather for '{}' failed: {}", location, source);
                    self.append_log(&failure_line(now(), location, CrawlFailure::Get, &source))
                        .await?;
                    report.failed.push((location.clone(), CrawlFailure::Get));
                    continue;
                }
                Err(e) => return Err(e),
            };

            match self.save_document(&document, location).await {
                Ok(file_name) => {
                    info!("Saved {}", file_name);
                    self.append_log(&success_line(now(), &file_name)).await?;
                    report.saved.push(file_name);
                }
                Err(e) => {
                    let reason = match &e {
                        ArchiveError::Persist { reason, .. } => reason.clone(),
                        other => other.to_string(),
                    };
                    warn!("Saving weather for '{}' failed: {}", location, reason);
                    self.append_log(&failure_line(now(), location, CrawlFailure::Save, &reason))
                        .await?;
                    report.failed.push((location.clone(), CrawlFailure::Save));
                }
            }
        }

        Ok(report)
    }

    fn location_url(&self, location: &str) -> String {
        format!(
            "{}/{}?{}",
            self.config.base_url.trim_end_matches('/'),
            location,
            JSON_FORMAT_QUERY
        )
    }

    async fn fetch(&self, location: &str) -> Result<Value> {
        let url = self.location_url(location);
        debug!("Requesting {}", url);

        let to_fetch_error = |source| ArchiveError::Fetch {
            location: location.to_string(),
            source,
        };

        self.client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(to_fetch_error)?
            .json::<Value>()
            .await
            .map_err(to_fetch_error)
    }

    /// Store a fetched document under its observation timestamp
    ///
    /// Returns the file name written inside the archive directory.
    pub async fn save_document(&self, document: &Value, location: &str) -> Result<String> {
        let persist_error = |reason: String| ArchiveError::Persist {
            location: location.to_string(),
            reason,
        };

        let obs_text = document
            .get(keys::CURRENT_CONDITION)
            .and_then(|c| c.get(0))
            .and_then(|c| c.get(keys::LOCAL_OBS_DATETIME))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                persist_error(format!(
                    "Required field '{}' not found",
                    keys::LOCAL_OBS_DATETIME
                ))
            })?;
        let observed_at: NaiveDateTime = parse_or_absent(obs_text, OBS_DATETIME_FORMAT)
            .ok_or_else(|| {
                persist_error(format!(
                    "Could not parse observation time '{}'",
                    obs_text
                ))
            })?;

        let file_name = weather_file_name(observed_at, location);
        let contents =
            serde_json::to_string_pretty(document).map_err(|e| persist_error(e.to_string()))?;
        tokio::fs::write(self.config.weatherfiledir.join(&file_name), contents)
            .await
            .map_err(|e| persist_error(e.to_string()))?;

        Ok(file_name)
    }

    async fn append_log(&self, line: &str) -> Result<()> {
        let mut log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.logfilepath)
            .await?;
        log.write_all(line.as_bytes()).await?;
        log.flush().await?;
        Ok(())
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::WeatherFileName;
    use chrono::NaiveDate;
    use serde_json::json;
    use tempfile::TempDir;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 5)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn test_crawler(temp_dir: &TempDir, locations: &[&str]) -> WeatherCrawler {
        let config = CrawlerConfig::new(
            locations.iter().map(|l| l.to_string()).collect(),
            temp_dir.path().join("data").join("weatherfiles"),
            temp_dir.path().join("logs").join("crawler.log"),
        );
        WeatherCrawler::new(config).unwrap()
    }

    #[test]
    fn test_log_lines() {
        assert_eq!(
            success_line(at(9, 15, 3), "20230105-0912_Berlin.json"),
            "+ 2023-01-05-091503: successfully saved 20230105-0912_Berlin.json.\n"
        );
        assert_eq!(
            failure_line(at(21, 0, 0), "Berlin", CrawlFailure::Get, &"timed out"),
            "! 2023-01-05-210000 Location 'Berlin': GET_ERROR: timed out\n"
        );
        assert_eq!(
            failure_line(at(21, 0, 0), "Berlin", CrawlFailure::Save, &"disk full"),
            "! 2023-01-05-210000 Location 'Berlin': SAVE_ERROR: disk full\n"
        );
    }

    #[test]
    fn test_new_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let crawler = test_crawler(&temp_dir, &["Berlin"]);

        assert!(crawler.config().weatherfiledir.is_dir());
        assert!(temp_dir.path().join("logs").is_dir());
    }

    #[test]
    fn test_location_url() {
        let temp_dir = TempDir::new().unwrap();
        let crawler = test_crawler(&temp_dir, &["Berlin"]);
        assert_eq!(
            crawler.location_url("Berlin"),
            "http://v2.wttr.in/Berlin?format=j1"
        );
    }

    #[tokio::test]
    async fn test_save_document() {
        let temp_dir = TempDir::new().unwrap();
        let crawler = test_crawler(&temp_dir, &["Berlin"]);
        let document = json!({
            "current_condition": [{"localObsDateTime": "2023-01-05 09:12 PM", "temp_C": "18"}]
        });

        let file_name = crawler.save_document(&document, "Berlin").await.unwrap();
        assert_eq!(file_name, "20230105-2112_Berlin.json");
        assert!(WeatherFileName::parse(&file_name).is_some());

        let written =
            std::fs::read_to_string(crawler.config().weatherfiledir.join(&file_name)).unwrap();
        assert!(written.starts_with("{\n  \"current_condition\""));
        let reread: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(reread, document);
    }

    #[tokio::test]
    async fn test_save_document_without_timestamp() {
        let temp_dir = TempDir::new().unwrap();
        let crawler = test_crawler(&temp_dir, &["Berlin"]);

        let result = crawler
            .save_document(&json!({"current_condition": []}), "Berlin")
            .await;
        match result.unwrap_err() {
            ArchiveError::Persist { location, reason } => {
                assert_eq!(location, "Berlin");
                assert!(reason.contains("localObsDateTime"));
            }
            other => panic!("Expected Persist error, got {:?}", other),
        }

        let result = crawler
            .save_document(
                &json!({"current_condition": [{"localObsDateTime": "yesterday"}]}),
                "Berlin",
            )
            .await;
        assert!(matches!(result, Err(ArchiveError::Persist { .. })));
    }

    #[tokio::test]
    async fn test_save_document_write_failure_is_persist_error() {
        let temp_dir = TempDir::new().unwrap();
        let crawler = test_crawler(&temp_dir, &["Berlin"]);
        std::fs::remove_dir_all(&crawler.config().weatherfiledir).unwrap();

        let document = json!({
            "current_condition": [{"localObsDateTime": "2023-01-05 09:12 PM"}]
        });
        match crawler.save_document(&document, "Berlin").await.unwrap_err() {
            ArchiveError::Persist { location, .. } => assert_eq!(location, "Berlin"),
            other => panic!("Expected Persist error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_logs_get_error() {
        let temp_dir = TempDir::new().unwrap();
        let config = CrawlerConfig::new(
            vec!["Berlin".to_string(), "Hamburg".to_string()],
            temp_dir.path().join("weatherfiles"),
            temp_dir.path().join("crawler.log"),
        )
        .with_base_url("http://127.0.0.1:9")
        .with_request_timeout(5);
        let crawler = WeatherCrawler::new(config).unwrap();

        let report = crawler.crawl().await.unwrap();
        assert!(report.saved.is_empty());
        assert_eq!(
            report.failed,
            vec![
                ("Berlin".to_string(), CrawlFailure::Get),
                ("Hamburg".to_string(), CrawlFailure::Get)
            ]
        );

        let log = std::fs::read_to_string(temp_dir.path().join("crawler.log")).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("! "));
        assert!(lines[0].contains("Location 'Berlin': GET_ERROR: "));
        assert!(lines[1].contains("Location 'Hamburg': GET_ERROR: "));
    }
}
