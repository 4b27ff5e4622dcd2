//! The concurrent pagination-and-extraction core
//!
//! This module contains:
//! - The retrying page task (fetch + parse + normalize, bounded retries)
//! - The category paginator (windowed concurrent rounds, adaptive stop)
//! - The run orchestrator (concurrent categories, output, summary)

mod orchestrator;
mod page_task;
mod paginator;

pub use orchestrator::Orchestrator;
pub use page_task::{fetch_page, page_url};
pub use paginator::Paginator;

use crate::config::Config;
use crate::fetch::{build_http_client, HttpFetcher};
use crate::output::RunStatistics;
use crate::Result;
use std::sync::Arc;

/// Runs a complete scrape with the HTTP-backed fetcher
///
/// This is the main entry point. It builds the shared HTTP client, wires up
/// the orchestrator, and runs all configured categories (or the one
/// selected).
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `selected` - Restrict the run to one named category
///
/// # Returns
///
/// * `Ok(RunStatistics)` - Run finished (cancelled and partial runs included)
/// * `Err(RecolteError)` - Critical setup failure
pub async fn run_scrape(config: Config, selected: Option<&str>) -> Result<RunStatistics> {
    let client = build_http_client(config.crawler.request_timeout())?;
    let fetcher = Arc::new(HttpFetcher::new(client));
    let orchestrator = Orchestrator::new(config, fetcher);
    orchestrator.run(selected).await
}
