//! The fixed CSS extraction schema
//!
//! The schema is a static declaration: one repeating result-container
//! selector plus named field selectors (text or attribute extraction). It is
//! supplied unchanged to the fetcher for every page, and nothing outside the
//! fetcher ever looks at markup. The selectors and French field names are
//! the ones the site's search result pages use.

use serde::Deserialize;

/// Field names used by the product schema and the CSV columns
pub const FIELD_NAME: &str = "Nom du produit";
pub const FIELD_LINK: &str = "Lien";
pub const FIELD_PRICE: &str = "Prix";
pub const FIELD_RATING: &str = "Note";
pub const FIELD_REVIEWS: &str = "Nombre d'avis";

/// Declarative extraction schema consumed by the page fetcher
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSchema {
    /// Schema display name
    pub name: String,

    /// Selector matching one repeating result container per item
    pub base_selector: String,

    /// Named field extractions applied within each container
    pub fields: Vec<FieldSpec>,
}

/// One named field extraction
#[derive(Debug, Clone, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub selector: String,
    pub kind: FieldKind,
}

/// How a matched element is turned into a value
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Concatenated text content of the element
    Text,
    /// A named attribute of the element
    Attribute(String),
}

impl ExtractionSchema {
    /// The product schema for Amazon.fr search result pages
    pub fn amazon_products() -> Self {
        Self {
            name: "Product".to_string(),
            base_selector: "div[data-component-type='s-search-result']".to_string(),
            fields: vec![
                FieldSpec {
                    name: FIELD_NAME.to_string(),
                    selector: "h2 a span, div.a-section.a-spacing-none.a-spacing-top-small.s-title-instructions-style > a > h2".to_string(),
                    kind: FieldKind::Text,
                },
                FieldSpec {
                    name: FIELD_LINK.to_string(),
                    selector: "h2 a, div.a-section.a-spacing-none.a-spacing-top-small.s-title-instructions-style > a".to_string(),
                    kind: FieldKind::Attribute("href".to_string()),
                },
                FieldSpec {
                    name: FIELD_PRICE.to_string(),
                    selector: "span.a-price > span.a-offscreen, span.a-price-whole, span.a-price-fraction, span.a-price-symbol".to_string(),
                    kind: FieldKind::Text,
                },
                FieldSpec {
                    name: FIELD_RATING.to_string(),
                    selector: "span.a-icon-alt, i.a-icon-star".to_string(),
                    kind: FieldKind::Text,
                },
                FieldSpec {
                    name: FIELD_REVIEWS.to_string(),
                    selector: "span.a-size-base.s-underline-text, span.a-size-base".to_string(),
                    kind: FieldKind::Text,
                },
            ],
        }
    }
}
