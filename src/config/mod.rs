//! Configuration loading and validation
//!
//! This module handles:
//! - The TOML configuration format (crawler tuning, output, category table)
//! - Built-in defaults reproducing the original scraper's setup
//! - Validation with descriptive error messages

mod parser;
mod types;
mod validation;

pub use parser::{default_config, load_config};
pub use types::{default_categories, CategorySpec, Config, CrawlerConfig, OutputConfig};
pub use validation::validate;
