//! Type-ahead catalog filtering.
//!
//! The match rule is intentionally permissive: a one-character query
//! matches nearly every title. Precision is traded for a forgiving
//! search-as-you-type feel.

use marquee_core::CatalogEntry;

/// Match an already lower-cased query against an already lower-cased title.
///
/// True when the query occurs in the title, when any whitespace token of
/// the title occurs in the query, or when the query occurs in any token.
pub fn fuzzy_match(query: &str, title: &str) -> bool {
    if title.contains(query) {
        return true;
    }
    title
        .split_whitespace()
        .any(|word| query.contains(word) || word.contains(query))
}

/// Keep the entries whose title matches `query`, in catalog order.
pub fn filter_entries(entries: &[CatalogEntry], query: &str) -> Vec<CatalogEntry> {
    let query = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| fuzzy_match(&query, &entry.title.to_lowercase()))
        .cloned()
        .collect()
}
