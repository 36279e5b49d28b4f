//! Command-line argument definitions for the weather archive
//!
//! Defines the CLI interface using the clap derive API. Verbosity flags are
//! global so they can be given before or after the subcommand.

use crate::models::TemperatureUnit;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the weather archive
///
/// Crawls current weather documents into a timestamped archive and rebuilds
/// typed, time-ordered histories from it.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wttr-archive",
    version,
    about = "Archive wttr.in weather observations and rebuild histories from them"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Fetch every configured location once and archive the documents
    Crawl(CrawlArgs),
    /// Build a stack for one location and summarise it
    Stack(StackArgs),
    /// Flatten all archived documents of a directory into one CSV file
    Export(ExportArgs),
    /// Print the temperature history of one location as CSV
    Temperature(TemperatureArgs),
}

#[derive(Debug, Clone, ClapArgs)]
pub struct CrawlArgs {
    /// Path to crawler configuration file
    ///
    /// Defaults to ./config.json, then the user configuration directory.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Date range and loading options shared by stack-based commands
#[derive(Debug, Clone, ClapArgs)]
pub struct RangeArgs {
    /// First date to include (YYYY-MM-DD)
    #[arg(long = "start", value_name = "DATE")]
    pub start_date: Option<String>,

    /// End of the range (YYYY-MM-DD), exclusive when --start is given
    #[arg(long = "end", value_name = "DATE")]
    pub end_date: Option<String>,

    /// Number of files parsed concurrently (0 = one per CPU)
    #[arg(short = 'j', long = "workers", value_name = "N", default_value = "1")]
    pub workers: usize,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct StackArgs {
    /// Archive directory
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// Location name as used in archive file names
    #[arg(value_name = "LOCATION")]
    pub location: String,

    #[command(flatten)]
    pub range: RangeArgs,

    /// Print the parsed records as JSON instead of a summary
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ExportArgs {
    /// Archive directory
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// Output CSV file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct TemperatureArgs {
    /// Archive directory
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// Location name as used in archive file names
    #[arg(value_name = "LOCATION")]
    pub location: String,

    /// Temperature unit (celsius or fahrenheit)
    #[arg(short = 'u', long = "unit", default_value = "celsius")]
    pub unit: TemperatureUnit,

    /// Add the feels-like temperature column
    #[arg(long = "feelslike")]
    pub feelslike: bool,

    #[command(flatten)]
    pub range: RangeArgs,
}

impl Args {
    /// Log level derived from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_levels() {
        let args = Args::parse_from(["wttr-archive", "export", "data", "-o", "out.csv"]);
        assert_eq!(args.get_log_level(), "warn");

        let args = Args::parse_from(["wttr-archive", "-vv", "export", "data", "-o", "out.csv"]);
        assert_eq!(args.get_log_level(), "debug");

        let args = Args::parse_from(["wttr-archive", "export", "data", "-o", "out.csv", "-q"]);
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["wttr-archive", "-v", "-q", "crawl"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_stack_args() {
        let args = Args::parse_from([
            "wttr-archive",
            "stack",
            "data/weatherfiles",
            "Berlin",
            "--start",
            "2023-01-01",
            "-j",
            "4",
            "--json",
        ]);

        match args.command {
            Commands::Stack(stack) => {
                assert_eq!(stack.location, "Berlin");
                assert_eq!(stack.range.start_date.as_deref(), Some("2023-01-01"));
                assert_eq!(stack.range.end_date, None);
                assert_eq!(stack.range.workers, 4);
                assert!(stack.json);
            }
            other => panic!("Expected stack command, got {:?}", other),
        }
    }

    #[test]
    fn test_temperature_args() {
        let args = Args::parse_from([
            "wttr-archive",
            "temperature",
            "data",
            "Berlin",
            "--unit",
            "fahrenheit",
            "--feelslike",
        ]);

        match args.command {
            Commands::Temperature(temperature) => {
                assert_eq!(temperature.unit, TemperatureUnit::Fahrenheit);
                assert!(temperature.feelslike);
                assert_eq!(temperature.range.workers, 1);
            }
            other => panic!("Expected temperature command, got {:?}", other),
        }

        let result =
            Args::try_parse_from(["wttr-archive", "temperature", "data", "Berlin", "-u", "kelvin"]);
        assert!(result.is_err());
    }
}
