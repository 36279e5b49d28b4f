//! Shared components for CLI commands
//!
//! Logging setup and the conversion of raw range arguments into
//! [`StackOptions`], used by every stack-based command.

use crate::cli::args::{Args, RangeArgs};
use crate::config::parse_boundary_date;
use crate::error::Result;
use crate::stack::{StackOptions, WeatherFileStack};
use std::path::Path;
use tracing::debug;

/// Set up structured logging for all commands
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wttr_archive={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Worker count for the loader, `0` meaning one per CPU
pub fn resolve_workers(workers: usize) -> usize {
    match workers {
        0 => num_cpus::get(),
        n => n,
    }
}

/// Turn range arguments into validated stack options
pub fn stack_options(range: &RangeArgs, show_progress: bool) -> Result<StackOptions> {
    let mut options = StackOptions::default()
        .with_workers(resolve_workers(range.workers))
        .with_progress(show_progress);

    if let Some(start) = &range.start_date {
        options = options.with_start_date(parse_boundary_date("start_date", start)?);
    }
    if let Some(end) = &range.end_date {
        options = options.with_end_date(parse_boundary_date("end_date", end)?);
    }

    options.validate()?;
    Ok(options)
}

/// Build a stack from command-line arguments
pub async fn build_stack(
    directory: &Path,
    location: &str,
    range: &RangeArgs,
    show_progress: bool,
) -> Result<WeatherFileStack> {
    let options = stack_options(range, show_progress)?;
    debug!("Building stack with {:?}", options);
    WeatherFileStack::build(directory, location, options).await
}
