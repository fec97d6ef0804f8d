//! Free-text search and category filtering over a place corpus.

use crate::place::Place;

/// Returns every place whose name, short description, or address contains
/// `query` as a case-insensitive substring.
///
/// Lowercasing is Unicode-aware, so Cyrillic queries fold correctly. An
/// empty query matches everything. No ranking is applied; corpus order is
/// preserved.
pub fn search(query: &str, corpus: &[Place]) -> Vec<Place> {
    let needle = query.to_lowercase();
    corpus
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
                || p.address.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Returns every place whose category tag equals `tag` exactly
/// (case-sensitive).
pub fn filter_by_category(tag: &str, corpus: &[Place]) -> Vec<Place> {
    corpus
        .iter()
        .filter(|p| p.category == tag)
        .cloned()
        .collect()
}
