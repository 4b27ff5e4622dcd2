use crate::record::{PriceField, ProductRecord, RawItem, NOT_AVAILABLE};
use url::Url;

/// Trims a textual field, substituting "N/A" for missing or empty values
pub fn clean_text(text: Option<&str>) -> String {
    match text {
        Some(t) if !t.trim().is_empty() => t.trim().to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Converts one raw extracted item into a canonical product record
///
/// Returns `None` when the item has no usable name (nothing is emitted for
/// it). Links that are not already absolute are resolved against the
/// category's base URL; a link that fails to resolve degrades to the empty
/// string, the one field exempt from the "N/A" substitution. Price fragment
/// lists are joined with a single space before cleanup.
///
/// Pure function of its inputs.
pub fn normalize(raw: RawItem, category: &str, base: &Url) -> Option<ProductRecord> {
    let name = raw.name.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() {
        return None;
    }

    let link = match raw.link {
        Some(l) if !l.is_empty() => {
            if l.starts_with("http") {
                l
            } else {
                base.join(&l).map(String::from).unwrap_or_default()
            }
        }
        _ => String::new(),
    };

    let price = match raw.price {
        Some(PriceField::Many(parts)) => clean_text(Some(&parts.join(" "))),
        Some(PriceField::One(p)) => clean_text(Some(&p)),
        None => NOT_AVAILABLE.to_string(),
    };

    Some(ProductRecord {
        category: category.to_string(),
        name,
        price,
        rating: clean_text(raw.rating.as_deref()),
        reviews: clean_text(raw.reviews.as_deref()),
        link,
    })
}
