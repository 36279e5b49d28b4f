//! Weather Archive Library
//!
//! A Rust library for archiving wttr.in JSON weather documents and turning
//! the archive back into typed, time-ordered histories.
//!
//! This library provides tools for:
//! - Crawling configured locations into `YYYYMMDD-HHMM_<location>.json` files
//! - Parsing archived documents into strict typed records
//! - Building per-location stacks over a date range, in parallel if requested
//! - Extracting temperature series and flattened CSV exports
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wttr_archive::{StackOptions, WeatherFileStack};
//!
//! # async fn example() -> wttr_archive::Result<()> {
//! let stack = WeatherFileStack::build("data/weatherfiles", "Berlin", StackOptions::default()).await?;
//! for file in &stack {
//!     println!("{}", file.current);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod crawler;
pub mod error;
pub mod export;
pub mod models;
pub mod naming;
pub mod parser;
pub mod series;
pub mod stack;
pub mod temporal;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::CrawlerConfig;
pub use crawler::{CrawlReport, WeatherCrawler};
pub use error::{ArchiveError, Result};
pub use models::{
    AstronomyConfig, ChanceOfConfig, CurrentConditionConfig, DailyConfig, HeatConfig,
    HourlyConfig, MoonConfig, NearestAreaConfig, RequestConfig, SunConfig, TemperatureConfig,
    TemperatureUnit, WeatherConfig, WeatherFileConfig,
};
pub use series::{TemperaturePoint, TemperatureSeries};
pub use stack::{ParseFailure, StackOptions, WeatherFileStack};
pub use temporal::{DateRange, date_range, parse_or_absent, validate};
