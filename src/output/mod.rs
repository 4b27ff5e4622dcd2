//! Output generation for scraped product data
//!
//! This module handles:
//! - CSV files (UTF-8 with BOM, French column headers, collection order)
//! - Timestamped per-category and aggregate file naming
//! - Run statistics logging

mod csv_output;
pub mod stats;

pub use csv_output::{aggregate_output_path, category_output_path, write_products_csv};
pub use stats::{log_statistics, summarize, RunStatistics};
