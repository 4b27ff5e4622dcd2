use std::collections::HashSet;

/// Per-category set of seen record fingerprints
///
/// Not thread-safe by construction: each category run owns exactly one
/// `SeenSet` and consults it only at the single-threaded aggregation step
/// after a round's join barrier, never from inside a concurrent fetch.
#[derive(Debug, Default)]
pub struct SeenSet {
    seen: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership check with insert-on-first-sight
    ///
    /// Returns `true` the first time a fingerprint is offered and `false`
    /// on every subsequent offer.
    pub fn is_new(&mut self, fingerprint: &str) -> bool {
        if self.seen.contains(fingerprint) {
            return false;
        }
        self.seen.insert(fingerprint.to_string());
        true
    }

    /// Number of distinct fingerprints accepted so far
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
