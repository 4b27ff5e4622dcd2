//! Product records and the raw extracted items they come from
//!
//! This module contains:
//! - `RawItem`, the typed shape of one extracted item from the fetcher
//! - `ProductRecord`, the canonical immutable record that gets persisted
//! - Normalization (text cleanup, link absolutization, price flattening)
//! - Per-category deduplication

mod dedup;
mod normalize;

pub use dedup::SeenSet;
pub use normalize::{clean_text, normalize};

use serde::{Deserialize, Serialize};

/// Placeholder written for missing or empty textual fields
pub const NOT_AVAILABLE: &str = "N/A";

/// One raw item as extracted by the fetcher
///
/// Keys are the schema's French field names. Any field may be missing; the
/// price may come back as a single string or as a list of text fragments
/// (currency symbol / whole / fraction nodes).
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    #[serde(rename = "Nom du produit", default)]
    pub name: Option<String>,

    #[serde(rename = "Lien", default)]
    pub link: Option<String>,

    #[serde(rename = "Prix", default)]
    pub price: Option<PriceField>,

    #[serde(rename = "Note", default)]
    pub rating: Option<String>,

    #[serde(rename = "Nombre d'avis", default)]
    pub reviews: Option<String>,
}

/// A price field: one text node or several fragments
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    One(String),
    Many(Vec<String>),
}

/// A canonical product record, immutable once created
///
/// Serializes to the CSV columns in their fixed order; the serde renames are
/// the output column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    #[serde(rename = "Catégorie")]
    pub category: String,

    #[serde(rename = "Nom du produit")]
    pub name: String,

    #[serde(rename = "Prix")]
    pub price: String,

    #[serde(rename = "Note")]
    pub rating: String,

    #[serde(rename = "Nombre d'avis")]
    pub reviews: String,

    #[serde(rename = "Lien")]
    pub link: String,
}

impl ProductRecord {
    /// Dedup key, scoped to one category run; never persisted
    pub fn fingerprint(&self) -> String {
        format!("{}_{}", self.name, self.price)
    }
}
