//! Temperature command: print the temperature history of one location

use super::shared::build_stack;
use crate::cli::args::TemperatureArgs;
use anyhow::{Context, Result};

pub async fn run_temperature(args: TemperatureArgs, show_progress: bool) -> Result<()> {
    let stack = build_stack(&args.directory, &args.location, &args.range, show_progress).await?;
    let series = stack.temperature_series(args.unit, args.feelslike);

    series
        .write_csv(std::io::stdout().lock())
        .context("Failed to write temperature series")?;
    Ok(())
}
