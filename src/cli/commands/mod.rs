//! Command implementations for the weather archive CLI
//!
//! Each subcommand lives in its own module. Library errors are wrapped with
//! `anyhow` context here, at the edge of the program.

pub mod crawl;
pub mod export;
pub mod shared;
pub mod stack;
pub mod temperature;

use crate::cli::args::{Args, Commands};
use anyhow::Result;

/// Main command runner
///
/// Sets up logging once, then dispatches to the subcommand handler.
pub async fn run(args: Args) -> Result<()> {
    shared::setup_logging(&args)?;
    let show_progress = args.show_progress();

    match args.command {
        Commands::Crawl(crawl_args) => crawl::run_crawl(crawl_args).await,
        Commands::Stack(stack_args) => stack::run_stack(stack_args, show_progress).await,
        Commands::Export(export_args) => export::run_export(export_args).await,
        Commands::Temperature(temperature_args) => {
            temperature::run_temperature(temperature_args, show_progress).await
        }
    }
}
