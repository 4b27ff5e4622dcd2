use crate::fetch::schema::{ExtractionSchema, FieldKind};
use crate::fetch::{FetchError, PageFetcher};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde_json::{Map, Value};

/// Fetcher that GETs a page over HTTP and applies the CSS extraction schema
///
/// Field values mirror the rendering engine the original scraper used: a
/// field matched once yields a string, a field matched several times within
/// one container yields a list of strings, and an unmatched field is omitted
/// from the item.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, schema: &ExtractionSchema) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;

        extract_items(&body, schema)
    }
}

/// Applies the schema to an HTML document and serializes the items as JSON
///
/// Returns `"[]"` when no result container matches, which the page task
/// treats as the end-of-results signal.
pub fn extract_items(html: &str, schema: &ExtractionSchema) -> Result<String, FetchError> {
    let document = Html::parse_document(html);

    let base = Selector::parse(&schema.base_selector)
        .map_err(|e| FetchError::Selector(e.to_string()))?;

    let mut field_selectors = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        let selector = Selector::parse(&field.selector)
            .map_err(|e| FetchError::Selector(e.to_string()))?;
        field_selectors.push((field, selector));
    }

    let mut items = Vec::new();
    for container in document.select(&base) {
        let mut item = Map::new();
        for (field, selector) in &field_selectors {
            let values: Vec<String> = container
                .select(selector)
                .filter_map(|el| extract_value(el, &field.kind))
                .collect();

            match values.len() {
                0 => {}
                1 => {
                    item.insert(field.name.clone(), Value::String(values.into_iter().next().unwrap_or_default()));
                }
                _ => {
                    item.insert(
                        field.name.clone(),
                        Value::Array(values.into_iter().map(Value::String).collect()),
                    );
                }
            }
        }
        items.push(Value::Object(item));
    }

    serde_json::to_string(&items).map_err(|e| FetchError::Payload(e.to_string()))
}

/// Extracts one value from a matched element per the field kind
fn extract_value(el: ElementRef<'_>, kind: &FieldKind) -> Option<String> {
    match kind {
        FieldKind::Text => {
            let text: String = el.text().collect();
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        }
        FieldKind::Attribute(attr) => el.value().attr(attr).map(|v| v.to_string()),
    }
}
