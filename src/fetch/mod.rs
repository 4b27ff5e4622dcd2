//! Page fetching behind the extraction-schema boundary
//!
//! This module contains:
//! - The `PageFetcher` trait, the seam between the crawl core and the page
//!   rendering/extraction machinery
//! - The reqwest/scraper-backed `HttpFetcher` implementation
//! - HTTP client construction with the original scraper's user agent
//!
//! The core only ever sees the JSON payload a fetcher returns; CSS selectors
//! and markup structure never leak past this module.

mod http_fetcher;
mod schema;

pub use http_fetcher::HttpFetcher;
pub use schema::{
    ExtractionSchema, FieldKind, FieldSpec, FIELD_LINK, FIELD_NAME, FIELD_PRICE, FIELD_RATING,
    FIELD_REVIEWS,
};

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors a page fetch can produce
///
/// Every variant is transient from the caller's point of view: the retrying
/// page task treats them all the same way (retry, then degrade to an empty
/// page).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid selector in schema: {0}")]
    Selector(String),

    #[error("failed to serialize extracted items: {0}")]
    Payload(String),
}

/// The external page-fetch collaborator
///
/// Given a URL and the fixed extraction schema, a fetcher returns the
/// extracted items as a JSON array string (`[]` when the page rendered but
/// contained no result containers), or a `FetchError`. Implementations may
/// be slow (seconds) and flaky; callers own retry policy.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, schema: &ExtractionSchema)
        -> Result<String, FetchError>;
}

/// Desktop browser user agent, as used by the original scraper
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Builds the shared HTTP client
///
/// One client is built per run and shared read-only across every in-flight
/// page task of every category.
///
/// # Arguments
///
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}
