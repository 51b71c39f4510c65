//! Chem-Harvest main entry point
//!
//! This is the command-line interface for the Chem-Harvest catalogue scraper.

use anyhow::Context;
use chem_harvest::config::load_config_with_hash;
use chem_harvest::crawler::run_harvest;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Chem-Harvest: a chemical catalogue scraper
///
/// Chem-Harvest walks a paginated product catalogue, scrapes each product
/// page, enriches the records with thumbnails and MSDS metadata, and
/// writes the validated collection to a JSON file.
#[derive(Parser, Debug)]
#[command(name = "chem-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A chemical catalogue scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Number of parallel crawlers to run
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    crawlers: u16,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    tracing::info!(
        "Harvesting {} with {} crawler(s)",
        config.catalogue.base_url,
        cli.crawlers
    );

    // Run the harvest
    match run_harvest(config, cli.crawlers as usize).await {
        Ok(()) => {
            tracing::info!("Harvest completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("chem_harvest=info,warn"),
            1 => EnvFilter::new("chem_harvest=debug,info"),
            2 => EnvFilter::new("chem_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
