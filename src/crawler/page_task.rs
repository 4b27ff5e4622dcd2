use crate::config::{CategorySpec, CrawlerConfig};
use crate::fetch::{ExtractionSchema, PageFetcher};
use crate::record::{normalize, ProductRecord, RawItem};
use url::Url;

/// Builds the paginated URL for one search page
pub fn page_url(base: &str, page: u32) -> String {
    format!("{}&page={}", base, page)
}

/// Fetches, parses, and normalizes one search page, with bounded retries
///
/// A failed fetch and a payload that does not parse as an item array are
/// handled identically: wait the fixed retry delay and try again, up to
/// `max_attempts` total attempts. A page that still fails then degrades to
/// an empty result - per-page failures never abort the category. A
/// successful fetch with no extractable items returns empty immediately;
/// whether that means end-of-results is the paginator's call, not this
/// task's.
///
/// Deduplication happens later, at the paginator's aggregation step.
pub async fn fetch_page(
    fetcher: &dyn PageFetcher,
    schema: &ExtractionSchema,
    category: &CategorySpec,
    base: &Url,
    page: u32,
    crawler: &CrawlerConfig,
) -> Vec<ProductRecord> {
    let url = page_url(&category.url, page);

    for attempt in 1..=crawler.max_attempts {
        let payload = match fetcher.fetch(&url, schema).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(
                    "Fetch failed for category '{}' page {} (attempt {}/{}): {}",
                    category.name,
                    page,
                    attempt,
                    crawler.max_attempts,
                    e
                );
                if attempt < crawler.max_attempts {
                    tokio::time::sleep(crawler.retry_delay()).await;
                }
                continue;
            }
        };

        let items: Vec<RawItem> = match serde_json::from_str(&payload) {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(
                    "Malformed payload for category '{}' page {} (attempt {}/{}): {}",
                    category.name,
                    page,
                    attempt,
                    crawler.max_attempts,
                    e
                );
                if attempt < crawler.max_attempts {
                    tokio::time::sleep(crawler.retry_delay()).await;
                }
                continue;
            }
        };

        if items.is_empty() {
            return Vec::new();
        }

        let records: Vec<ProductRecord> = items
            .into_iter()
            .filter_map(|raw| normalize(raw, &category.name, base))
            .collect();

        tracing::debug!(
            "{} products extracted from page {} of '{}'",
            records.len(),
            page,
            category.name
        );
        return records;
    }

    tracing::error!(
        "Giving up on page {} of category '{}' after {} attempts",
        page,
        category.name,
        crawler.max_attempts
    );
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fetcher that always fails, counting attempts
    struct FailingFetcher {
        attempts: AtomicU32,
    }

    #[async_trait]
    impl PageFetcher for FailingFetcher {
        async fn fetch(&self, url: &str, _schema: &ExtractionSchema) -> Result<String, FetchError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            })
        }
    }

    /// Fetcher that returns a fixed payload, counting attempts
    struct FixedFetcher {
        payload: String,
        attempts: AtomicU32,
    }

    #[async_trait]
    impl PageFetcher for FixedFetcher {
        async fn fetch(
            &self,
            _url: &str,
            _schema: &ExtractionSchema,
        ) -> Result<String, FetchError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Ok(self.payload.clone())
        }
    }

    fn create_test_category() -> CategorySpec {
        CategorySpec {
            name: "Test".to_string(),
            url: "https://www.amazon.fr/s?i=computers&fs=true".to_string(),
            subcategories: vec![],
        }
    }

    fn create_test_crawler() -> CrawlerConfig {
        CrawlerConfig::default()
    }

    fn base_url(category: &CategorySpec) -> Url {
        Url::parse(&category.url).unwrap()
    }

    #[test]
    fn test_page_url_appends_page_parameter() {
        assert_eq!(
            page_url("https://www.amazon.fr/s?i=toys", 7),
            "https://www.amazon.fr/s?i=toys&page=7"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_cap_exactly_three_attempts_then_empty() {
        let fetcher = FailingFetcher {
            attempts: AtomicU32::new(0),
        };
        let schema = ExtractionSchema::amazon_products();
        let category = create_test_category();
        let crawler = create_test_crawler();

        let records = fetch_page(
            &fetcher,
            &schema,
            &category,
            &base_url(&category),
            1,
            &crawler,
        )
        .await;

        assert!(records.is_empty());
        assert_eq!(fetcher.attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_payload_retried_like_a_fetch_failure() {
        let fetcher = FixedFetcher {
            payload: "not json at all".to_string(),
            attempts: AtomicU32::new(0),
        };
        let schema = ExtractionSchema::amazon_products();
        let category = create_test_category();
        let crawler = create_test_crawler();

        let records = fetch_page(
            &fetcher,
            &schema,
            &category,
            &base_url(&category),
            1,
            &crawler,
        )
        .await;

        assert!(records.is_empty());
        assert_eq!(fetcher.attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_payload_returns_immediately() {
        let fetcher = FixedFetcher {
            payload: "[]".to_string(),
            attempts: AtomicU32::new(0),
        };
        let schema = ExtractionSchema::amazon_products();
        let category = create_test_category();
        let crawler = create_test_crawler();

        let records = fetch_page(
            &fetcher,
            &schema,
            &category,
            &base_url(&category),
            1,
            &crawler,
        )
        .await;

        assert!(records.is_empty());
        assert_eq!(fetcher.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_items_are_normalized_and_nameless_items_skipped() {
        let payload = r#"[
            {"Nom du produit": "  Clavier  ", "Prix": ["€", "19", "99"], "Lien": "/dp/A1"},
            {"Prix": "9,99 €"},
            {"Nom du produit": "Souris", "Note": "4,5 sur 5 étoiles"}
        ]"#;
        let fetcher = FixedFetcher {
            payload: payload.to_string(),
            attempts: AtomicU32::new(0),
        };
        let schema = ExtractionSchema::amazon_products();
        let category = create_test_category();
        let crawler = create_test_crawler();

        let records = fetch_page(
            &fetcher,
            &schema,
            &category,
            &base_url(&category),
            1,
            &crawler,
        )
        .await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Clavier");
        assert_eq!(records[0].price, "€ 19 99");
        assert_eq!(records[0].link, "https://www.amazon.fr/dp/A1");
        assert_eq!(records[1].name, "Souris");
        assert_eq!(records[1].rating, "4,5 sur 5 étoiles");
    }
}
