//! Export command: flatten an archive directory into one CSV file

use crate::cli::args::ExportArgs;
use crate::export::load_all;
use anyhow::{Context, Result};
use colored::*;

pub async fn run_export(args: ExportArgs) -> Result<()> {
    let directory = args.directory.clone();
    let table = tokio::task::spawn_blocking(move || load_all(&directory))
        .await
        .context("Export task failed")?
        .with_context(|| format!("Failed to read archive {}", args.directory.display()))?;

    if table.is_empty() {
        anyhow::bail!(
            "No exportable weather files found in {}",
            args.directory.display()
        );
    }

    table
        .write_csv(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("\n{}", "Export Summary".bright_green().bold());
    println!("  Rows: {}", table.len().to_string().bright_white().bold());
    println!(
        "  Columns: {}",
        table.columns().len().to_string().bright_white().bold()
    );
    println!("  Output: {}", args.output.display());

    Ok(())
}
