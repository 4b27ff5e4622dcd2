//! Run statistics
//!
//! Summarizes a finished run: total record count and the per-category
//! breakdown, logged after the aggregate file is written.

use crate::record::ProductRecord;

/// Summary of one scraping run
#[derive(Debug, Clone, Default)]
pub struct RunStatistics {
    /// Total records collected across all categories
    pub total_products: usize,

    /// Per-category record counts, in first-appearance order
    pub per_category: Vec<(String, usize)>,
}

impl RunStatistics {
    pub fn count_for(&self, category: &str) -> usize {
        self.per_category
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

/// Computes run statistics from the aggregate record list
pub fn summarize(records: &[ProductRecord]) -> RunStatistics {
    let mut per_category: Vec<(String, usize)> = Vec::new();

    for record in records {
        match per_category
            .iter_mut()
            .find(|(name, _)| name == &record.category)
        {
            Some((_, count)) => *count += 1,
            None => per_category.push((record.category.clone(), 1)),
        }
    }

    RunStatistics {
        total_products: records.len(),
        per_category,
    }
}

/// Logs the run summary
pub fn log_statistics(stats: &RunStatistics) {
    tracing::info!("Statistics:");
    tracing::info!("Total products collected: {}", stats.total_products);
    tracing::info!("Breakdown by category:");
    for (category, count) in &stats.per_category {
        tracing::info!("{}: {} products", category, count);
    }
}
