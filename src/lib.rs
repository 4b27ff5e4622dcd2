//! Récolte: a concurrent Amazon.fr product-category scraper
//!
//! This crate paginates a fixed set of category search pages in concurrent
//! windows, extracts product records through a fixed CSS extraction schema,
//! deduplicates them per category, and writes timestamped CSV output.

pub mod config;
pub mod crawler;
pub mod fetch;
pub mod output;
pub mod record;
pub mod state;

use thiserror::Error;

/// Main error type for Récolte operations
#[derive(Debug, Error)]
pub enum RecolteError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] fetch::FetchError),

    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Récolte operations
pub type Result<T> = std::result::Result<T, RecolteError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{CategorySpec, Config};
pub use fetch::{build_http_client, ExtractionSchema, HttpFetcher, PageFetcher};
pub use record::ProductRecord;
pub use state::CancelToken;
