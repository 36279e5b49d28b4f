//! Loading of discovered files into parsed records
//!
//! Files are parsed either one after another on a single blocking task or
//! fanned out over up to `workers` blocking tasks at once. Both paths return
//! results in the order of the input file list, whatever order the parses
//! complete in.

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tokio::task;
use tracing::debug;

use crate::error::{ArchiveError, Result};
use crate::models::WeatherFileConfig;
use crate::parser::parse_weather_file;

/// Outcome of parsing one discovered file
pub type LoadResult = (PathBuf, Result<WeatherFileConfig>);

/// Parse `files` for `location`, preserving input order
pub async fn load_files(
    files: Vec<PathBuf>,
    location: &str,
    workers: usize,
    show_progress: bool,
) -> Result<Vec<LoadResult>> {
    let progress_bar = show_progress.then(|| create_progress_bar(files.len() as u64, location));

    let results = if workers > 1 {
        load_parallel(files, location, workers, progress_bar.clone()).await
    } else {
        load_sequential(files, location, progress_bar.clone()).await?
    };

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    Ok(results)
}

/// Parse every file in order on one blocking task
async fn load_sequential(
    files: Vec<PathBuf>,
    location: &str,
    progress_bar: Option<ProgressBar>,
) -> Result<Vec<LoadResult>> {
    debug!("Loading {} files sequentially", files.len());
    let location = location.to_string();

    let results = task::spawn_blocking(move || {
        files
            .into_iter()
            .map(|path| {
                let parsed = parse_weather_file(&path, &location);
                if let Some(pb) = &progress_bar {
                    pb.inc(1);
                }
                (path, parsed)
            })
            .collect::<Vec<_>>()
    })
    .await?;

    Ok(results)
}

/// Parse files on up to `workers` blocking tasks, gathering in input order
async fn load_parallel(
    files: Vec<PathBuf>,
    location: &str,
    workers: usize,
    progress_bar: Option<ProgressBar>,
) -> Vec<LoadResult> {
    debug!("Loading {} files with {} workers", files.len(), workers);

    stream::iter(files)
        .map(|path| {
            let location = location.to_string();
            async move {
                let task_path = path.clone();
                let parsed = task::spawn_blocking(move || parse_weather_file(&task_path, &location))
                    .await
                    .unwrap_or_else(|e| Err(ArchiveError::from(e)));
                (path, parsed)
            }
        })
        // `buffered` yields in submission order; completion order is irrelevant
        .buffered(workers)
        .inspect(|_| {
            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }
        })
        .collect()
        .await
}

/// Create a progress bar for loading files of one location
fn create_progress_bar(total: u64, location: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} ETA: {eta}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(format!("Loading weather files for {}", location));
    pb
}
