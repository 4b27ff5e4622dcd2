//! Récolte main entry point
//!
//! Command-line interface for the Amazon.fr category scraper. With no
//! arguments it scrapes every built-in category; ctrl-c stops the run
//! cooperatively and writes everything collected so far.

use clap::Parser;
use recolte::config::{default_config, load_config, Config};
use recolte::crawler::run_scrape;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Récolte: a concurrent Amazon.fr product-category scraper
#[derive(Parser, Debug)]
#[command(name = "recolte")]
#[command(version = "1.0.0")]
#[command(about = "Concurrent Amazon.fr category scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in category table when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Scrape a single named category instead of the full table
    #[arg(short, long, value_name = "NAME")]
    category: Option<String>,

    /// Validate config and list what would be scraped without scraping
    #[arg(long)]
    dry_run: bool,

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
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => default_config(),
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_scrape(config, cli.category.as_deref()).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("recolte=info,warn"),
            1 => EnvFilter::new("recolte=debug,info"),
            2 => EnvFilter::new("recolte=trace,debug"),
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

/// Handles the --dry-run mode: validates config and lists the category table
fn handle_dry_run(config: &Config) {
    println!("=== Récolte Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Window width: {} pages per round", config.crawler.window_width);
    println!("  Attempts per page: {}", config.crawler.max_attempts);
    println!("  Retry delay: {}s", config.crawler.retry_delay_secs);
    println!("  Round pause: {}s", config.crawler.round_pause_secs);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  File prefix: {}", config.output.file_prefix);

    println!("\nCategories ({}):", config.categories.len());
    for category in &config.categories {
        println!("  - {} ({})", category.name, category.url);
        if !category.subcategories.is_empty() {
            println!("    sous-catégories: {}", category.subcategories.join(", "));
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the scrape itself
async fn handle_scrape(config: Config, selected: Option<&str>) -> anyhow::Result<()> {
    match selected {
        Some(name) => tracing::info!("Scraping single category: {}", name),
        None => tracing::info!("Scraping all {} categories", config.categories.len()),
    }

    match run_scrape(config, selected).await {
        Ok(stats) => {
            tracing::info!(
                "Scrape finished: {} products across {} categories",
                stats.total_products,
                stats.per_category.len()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Critical failure: {}", e);
            Err(e.into())
        }
    }
}
