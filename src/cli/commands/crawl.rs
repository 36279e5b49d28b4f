//! Crawl command: fetch every configured location once

use crate::cli::args::CrawlArgs;
use crate::config::CrawlerConfig;
use crate::crawler::WeatherCrawler;
use anyhow::{Context, Result};
use colored::*;
use tracing::info;

pub async fn run_crawl(args: CrawlArgs) -> Result<()> {
    let config_path = args
        .config
        .unwrap_or_else(CrawlerConfig::default_config_path);
    info!("Using config file: {}", config_path.display());

    let config = CrawlerConfig::load(&config_path)?;
    let log_path = config.logfilepath.clone();
    let crawler = WeatherCrawler::new(config).context("Failed to set up the crawler")?;

    let report = crawler
        .crawl()
        .await
        .with_context(|| format!("Failed to write crawl log {}", log_path.display()))?;

    println!("\n{}", "Crawl Summary".bright_green().bold());
    println!(
        "  Saved: {}",
        report.saved.len().to_string().bright_white().bold()
    );
    for file_name in &report.saved {
        println!("    {}", file_name);
    }
    if !report.is_success() {
        println!(
            "  Failed: {}",
            report.failed.len().to_string().bright_red().bold()
        );
        for (location, failure) in &report.failed {
            println!("    {} ({})", location, failure);
        }
    }
    println!("  Log: {}", log_path.display());

    Ok(())
}
