//! Stack command: build a stack and summarise it

use super::shared::build_stack;
use crate::cli::args::StackArgs;
use crate::constants::OBS_DATETIME_FORMAT;
use crate::stack::WeatherFileStack;
use anyhow::{Context, Result};
use colored::*;

pub async fn run_stack(args: StackArgs, show_progress: bool) -> Result<()> {
    let stack = build_stack(&args.directory, &args.location, &args.range, show_progress).await?;

    if args.json {
        let json = serde_json::to_string_pretty(stack.files())
            .context("Failed to serialise stack records")?;
        println!("{}", json);
    } else {
        print_summary(&stack);
    }

    Ok(())
}

fn print_summary(stack: &WeatherFileStack) {
    println!("\n{}", stack.to_string().bright_green().bold());
    println!("  Directory: {}", stack.directory().display());
    println!(
        "  Files loaded: {}",
        stack.len().to_string().bright_white().bold()
    );

    let observations = || stack.iter().filter_map(|f| f.current.obs_datetime_loc);
    if let (Some(first), Some(last)) = (observations().min(), observations().max()) {
        println!(
            "  Observations: {} to {}",
            first.format(OBS_DATETIME_FORMAT),
            last.format(OBS_DATETIME_FORMAT)
        );
    }

    if !stack.failures().is_empty() {
        println!(
            "  Files skipped: {}",
            stack.failures().len().to_string().bright_red().bold()
        );
        for failure in stack.failures() {
            println!("    {}: {}", failure.path.display(), failure.reason);
        }
    }
}
