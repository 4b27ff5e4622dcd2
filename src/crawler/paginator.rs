use crate::config::{CategorySpec, CrawlerConfig};
use crate::crawler::page_task::fetch_page;
use crate::fetch::{ExtractionSchema, PageFetcher};
use crate::record::{ProductRecord, SeenSet};
use crate::state::CancelToken;
use std::sync::Arc;
use url::Url;

/// Drives the pagination loop for one category
///
/// Each round spawns a window of concurrent page tasks, waits for every one
/// of them (the barrier - stragglers are never abandoned), then aggregates
/// in ascending page order through the category's seen-set. Termination is
/// adaptive: the loop stops on the first round that contributes no new
/// records, or at a round boundary once cancellation is signaled.
pub struct Paginator {
    fetcher: Arc<dyn PageFetcher>,
    schema: Arc<ExtractionSchema>,
    crawler: CrawlerConfig,
    cancel: CancelToken,
}

impl Paginator {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        schema: Arc<ExtractionSchema>,
        crawler: CrawlerConfig,
        cancel: CancelToken,
    ) -> Self {
        Self {
            fetcher,
            schema,
            crawler,
            cancel,
        }
    }

    /// Runs the pagination loop for one category to completion
    ///
    /// Returns the full accumulated record list regardless of why the loop
    /// ended: natural end-of-results, an all-empty round, or cancellation.
    /// The accumulator and seen-set are owned exclusively by this call and
    /// touched only at the post-barrier aggregation step, so no lock is
    /// needed anywhere.
    pub async fn run_category(&self, category: &CategorySpec) -> Vec<ProductRecord> {
        tracing::info!("Scraping category: {}", category.name);

        let base = match Url::parse(&category.url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Invalid base URL for category '{}': {}", category.name, e);
                return Vec::new();
            }
        };

        let window = self.crawler.window_width;
        let mut seen = SeenSet::new();
        let mut accumulated: Vec<ProductRecord> = Vec::new();
        let mut cursor: u32 = 1;

        loop {
            // Round boundary: the only place cancellation is observed.
            if self.cancel.is_cancelled() {
                tracing::info!(
                    "Cancellation observed for category '{}', returning {} records",
                    category.name,
                    accumulated.len()
                );
                break;
            }

            // Launch the round: one task per page in [cursor, cursor + window).
            let mut handles = Vec::with_capacity(window as usize);
            for page in cursor..cursor + window {
                let fetcher = Arc::clone(&self.fetcher);
                let schema = Arc::clone(&self.schema);
                let category = category.clone();
                let base = base.clone();
                let crawler = self.crawler.clone();

                handles.push(tokio::spawn(async move {
                    fetch_page(fetcher.as_ref(), &schema, &category, &base, page, &crawler).await
                }));
            }

            // Barrier + aggregation: awaiting handles in launch order restores
            // page-number order no matter when each fetch completed.
            let mut round_new = 0usize;
            for (offset, handle) in handles.into_iter().enumerate() {
                let page_records = match handle.await {
                    Ok(records) => records,
                    Err(e) => {
                        tracing::error!(
                            "Page task for category '{}' page {} panicked: {}",
                            category.name,
                            cursor + offset as u32,
                            e
                        );
                        Vec::new()
                    }
                };

                for record in page_records {
                    if seen.is_new(&record.fingerprint()) {
                        accumulated.push(record);
                        round_new += 1;
                    }
                }
            }

            tracing::info!(
                "{} new products found on pages {}-{} of '{}'",
                round_new,
                cursor,
                cursor + window - 1,
                category.name
            );

            // End of results: a whole round without a single new record.
            if round_new == 0 {
                break;
            }

            cursor += window;
            tokio::time::sleep(self.crawler.round_pause()).await;
        }

        tracing::info!(
            "Category '{}' finished with {} records",
            category.name,
            accumulated.len()
        );
        accumulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fetcher scripted per page number, with a per-page artificial delay so
    /// completion order can be scrambled relative to page order
    struct ScriptedFetcher {
        pages: HashMap<u32, String>,
        delays_ms: HashMap<u32, u64>,
        calls: AtomicU32,
    }

    impl ScriptedFetcher {
        fn new(pages: HashMap<u32, String>) -> Self {
            Self {
                pages,
                delays_ms: HashMap::new(),
                calls: AtomicU32::new(0),
            }
        }

        fn page_number(url: &str) -> u32 {
            url.rsplit("&page=")
                .next()
                .and_then(|n| n.parse().ok())
                .unwrap_or(0)
        }
    }

    #[async_trait]
    impl PageFetcher for ScriptedFetcher {
        async fn fetch(&self, url: &str, _schema: &ExtractionSchema) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let page = Self::page_number(url);
            if let Some(delay) = self.delays_ms.get(&page) {
                tokio::time::sleep(std::time::Duration::from_millis(*delay)).await;
            }
            Ok(self.pages.get(&page).cloned().unwrap_or_else(|| "[]".to_string()))
        }
    }

    fn item_payload(names: &[&str]) -> String {
        let items: Vec<_> = names
            .iter()
            .map(|n| json!({"Nom du produit": n, "Prix": "9,99 €"}))
            .collect();
        serde_json::to_string(&items).unwrap()
    }

    fn create_test_category() -> CategorySpec {
        CategorySpec {
            name: "Test".to_string(),
            url: "https://www.amazon.fr/s?i=computers&fs=true".to_string(),
            subcategories: vec![],
        }
    }

    fn create_test_crawler(window: u32) -> CrawlerConfig {
        CrawlerConfig {
            window_width: window,
            max_attempts: 1,
            retry_delay_secs: 0,
            round_pause_secs: 0,
            request_timeout_secs: 5,
        }
    }

    fn create_paginator(fetcher: ScriptedFetcher, window: u32, cancel: CancelToken) -> Paginator {
        Paginator::new(
            Arc::new(fetcher),
            Arc::new(ExtractionSchema::amazon_products()),
            create_test_crawler(window),
            cancel,
        )
    }

    #[tokio::test]
    async fn test_terminates_on_all_empty_first_round() {
        let fetcher = ScriptedFetcher::new(HashMap::new());
        let paginator = create_paginator(fetcher, 3, CancelToken::new());

        let records = paginator.run_category(&create_test_category()).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_accumulates_across_rounds_until_empty_round() {
        let mut pages = HashMap::new();
        // Round one: pages 1-2 have items. Round two: nothing new.
        pages.insert(1, item_payload(&["A", "B"]));
        pages.insert(2, item_payload(&["C"]));
        let fetcher = ScriptedFetcher::new(pages);
        let paginator = create_paginator(fetcher, 2, CancelToken::new());

        let records = paginator.run_category(&create_test_category()).await;
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_round_of_pure_duplicates_terminates() {
        let mut pages = HashMap::new();
        pages.insert(1, item_payload(&["A", "B"]));
        // Round two repeats round one's items; zero new records must stop
        // the loop even though the pages were non-empty.
        pages.insert(3, item_payload(&["A"]));
        pages.insert(4, item_payload(&["B"]));
        let fetcher = ScriptedFetcher::new(pages);
        let paginator = create_paginator(fetcher, 2, CancelToken::new());

        let records = paginator.run_category(&create_test_category()).await;
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_duplicates_within_a_round_kept_once() {
        let mut pages = HashMap::new();
        pages.insert(1, item_payload(&["A", "B"]));
        pages.insert(2, item_payload(&["B", "C"]));
        let fetcher = ScriptedFetcher::new(pages);
        let paginator = create_paginator(fetcher, 2, CancelToken::new());

        let records = paginator.run_category(&create_test_category()).await;
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_order_preserved_despite_completion_order() {
        let mut pages = HashMap::new();
        pages.insert(1, item_payload(&["P1"]));
        pages.insert(2, item_payload(&["P2"]));
        pages.insert(3, item_payload(&["P3"]));
        let mut fetcher = ScriptedFetcher::new(pages);
        // Page 1 finishes last, page 3 first.
        fetcher.delays_ms.insert(1, 50);
        fetcher.delays_ms.insert(2, 20);
        fetcher.delays_ms.insert(3, 1);
        let paginator = create_paginator(fetcher, 3, CancelToken::new());

        let records = paginator.run_category(&create_test_category()).await;
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["P1", "P2", "P3"]);
    }

    #[tokio::test]
    async fn test_pre_set_cancellation_yields_empty_without_fetching() {
        let mut pages = HashMap::new();
        pages.insert(1, item_payload(&["A"]));
        let fetcher = ScriptedFetcher::new(pages);
        let cancel = CancelToken::new();
        cancel.cancel();
        let paginator = create_paginator(fetcher, 2, cancel);

        let records = paginator.run_category(&create_test_category()).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_failed_page_degrades_to_empty_and_category_survives() {
        struct HalfBrokenFetcher;

        #[async_trait]
        impl PageFetcher for HalfBrokenFetcher {
            async fn fetch(
                &self,
                url: &str,
                _schema: &ExtractionSchema,
            ) -> Result<String, FetchError> {
                if ScriptedFetcher::page_number(url) == 1 {
                    Err(FetchError::Status {
                        url: url.to_string(),
                        status: 500,
                    })
                } else {
                    Ok(item_payload(&["Survivor"]))
                }
            }
        }

        let paginator = Paginator::new(
            Arc::new(HalfBrokenFetcher),
            Arc::new(ExtractionSchema::amazon_products()),
            create_test_crawler(2),
            CancelToken::new(),
        );

        let records = paginator.run_category(&create_test_category()).await;
        // Page 1 failed outright, page 2 contributed; later rounds repeat
        // the same payload and dedup away.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Survivor");
    }
}
