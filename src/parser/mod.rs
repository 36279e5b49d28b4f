//! Single-file parser for archived weather documents
//!
//! Turns one loosely structured JSON document, as saved by the crawler, into
//! a strict [`WeatherFileConfig`](crate::models::WeatherFileConfig).
//!
//! ## Architecture
//!
//! - [`record_parser`] - Maps each level of the document into the record schema
//! - [`field_parsers`] - Value unwrapping, numeric coercion and optional-field handling
//!
//! Fields listed in [`optional_fields`](crate::constants::optional_fields)
//! resolve to `None` when missing. Every other field is required, and a
//! missing or unparsable required field fails the whole file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wttr_archive::parser::parse_weather_file;
//!
//! # fn example() -> wttr_archive::error::Result<()> {
//! let record = parse_weather_file(Path::new("20230105-0912_Berlin.json"), "Berlin")?;
//! println!("{} with {} forecast days", record, record.daily.len());
//! # Ok(())
//! # }
//! ```

pub mod field_parsers;
pub mod record_parser;

#[cfg(test)]
pub mod tests;

pub use field_parsers::FieldError;
pub use record_parser::{parse_weather_document, parse_weather_file};
