use crate::config::{CategorySpec, Config};
use crate::crawler::paginator::Paginator;
use crate::fetch::{ExtractionSchema, PageFetcher};
use crate::output::{
    aggregate_output_path, category_output_path, log_statistics, summarize, write_products_csv,
    RunStatistics,
};
use crate::record::ProductRecord;
use crate::state::{spawn_cancel_listener, CancelToken};
use crate::{RecolteError, Result};
use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;

/// Runs all (or one selected) category scrapes concurrently and persists
/// their results
///
/// The orchestrator owns the cancellation token. Failures while processing
/// one category's results never affect the others; only setup failures
/// (unknown category selection, output directory creation) abort the run,
/// and those happen before any category task starts.
pub struct Orchestrator {
    config: Arc<Config>,
    fetcher: Arc<dyn PageFetcher>,
    schema: Arc<ExtractionSchema>,
    cancel: CancelToken,
}

impl Orchestrator {
    pub fn new(config: Config, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
            schema: Arc::new(ExtractionSchema::amazon_products()),
            cancel: CancelToken::new(),
        }
    }

    /// The token category runs observe; tests set it directly
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Resolves the category selection against the configured table
    fn select_categories(&self, selected: Option<&str>) -> Result<Vec<CategorySpec>> {
        match selected {
            Some(name) => self
                .config
                .categories
                .iter()
                .find(|c| c.name == name)
                .cloned()
                .map(|c| vec![c])
                .ok_or_else(|| RecolteError::UnknownCategory {
                    name: name.to_string(),
                }),
            None => Ok(self.config.categories.clone()),
        }
    }

    /// Runs the full scrape
    ///
    /// Launches one paginator per selected category, all concurrent, and
    /// waits for every one of them - cancellation shortens individual runs
    /// but never the wait. Each non-empty category gets a timestamped CSV;
    /// the aggregate file and summary follow once all categories finish.
    ///
    /// # Arguments
    ///
    /// * `selected` - Restrict the run to one named category
    ///
    /// # Returns
    ///
    /// * `Ok(RunStatistics)` - Per-category counts, partial runs included
    /// * `Err(RecolteError)` - Critical setup failure, nothing was scraped
    pub async fn run(&self, selected: Option<&str>) -> Result<RunStatistics> {
        let categories = self.select_categories(selected)?;

        let directory = PathBuf::from(&self.config.output.directory);
        std::fs::create_dir_all(&directory)?;

        let listener = spawn_cancel_listener(self.cancel.clone());

        let mut handles = Vec::with_capacity(categories.len());
        for category in categories {
            if self.cancel.is_cancelled() {
                tracing::info!("Cancellation requested, not starting remaining categories");
                break;
            }

            let paginator = Paginator::new(
                Arc::clone(&self.fetcher),
                Arc::clone(&self.schema),
                self.config.crawler.clone(),
                self.cancel.clone(),
            );
            let name = category.name.clone();
            let handle =
                tokio::spawn(async move { paginator.run_category(&category).await });
            handles.push((name, handle));
        }

        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let prefix = &self.config.output.file_prefix;
        let mut all_records: Vec<ProductRecord> = Vec::new();

        for (name, handle) in handles {
            let records = match handle.await {
                Ok(records) => records,
                Err(e) => {
                    tracing::error!("Category '{}' run failed: {}", name, e);
                    continue;
                }
            };

            if records.is_empty() {
                tracing::warn!("No products collected for category '{}'", name);
                continue;
            }

            let path = category_output_path(&directory, prefix, &name, &timestamp);
            if let Err(e) = write_products_csv(&path, &records) {
                tracing::error!("Failed to write output for category '{}': {}", name, e);
            }
            all_records.extend(records);
        }

        listener.abort();

        let stats = summarize(&all_records);
        if !all_records.is_empty() {
            let path = aggregate_output_path(&directory, prefix, &timestamp);
            if let Err(e) = write_products_csv(&path, &all_records) {
                tracing::error!("Failed to write aggregate output: {}", e);
            }
            log_statistics(&stats);
        }

        Ok(stats)
    }
}
