//! Error handling for weather archive operations.
//!
//! Data-quality problems inside a single archived file surface as
//! [`ArchiveError::MalformedRecord`] and are absorbed by the stack builder.
//! Configuration and discovery problems are fatal and propagate to the caller.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Invalid glob pattern: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Background task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Malformed weather record in file: {path} - {reason}")]
    MalformedRecord { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("No weather files found for location '{location}' in {directory} for the given time range")]
    NoFilesFound { location: String, directory: PathBuf },

    #[error("None of the {failed} weather files for location '{location}' in {directory} could be parsed")]
    NoParsableFiles {
        location: String,
        directory: PathBuf,
        failed: usize,
    },

    #[error("File name does not follow the YYYYMMDD-HHMM_<location>.json convention: {path}")]
    InvalidFileName { path: PathBuf },

    #[error("GET_ERROR for location '{location}': {source}")]
    Fetch {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("SAVE_ERROR for location '{location}': {reason}")]
    Persist { location: String, reason: String },
}

impl ArchiveError {
    /// Create a malformed record error for one archived file
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
