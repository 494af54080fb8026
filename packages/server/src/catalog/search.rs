//! In-memory recipe search.

use crate::entity::recipe;

/// Trim and case-fold a raw search term. `None` when nothing is left.
pub fn normalize_term(raw: &str) -> Option<String> {
    let term = raw.trim();
    if term.is_empty() {
        None
    } else {
        Some(term.to_lowercase())
    }
}

/// Case-insensitive substring match against the title, the summary or any
/// single ingredient line. `term` must already be normalized.
pub fn matches(recipe: &recipe::Model, term: &str) -> bool {
    contains_folded(&recipe.title, term)
        || contains_folded(&recipe.summary, term)
        || recipe::from_json_list(&recipe.ingredients)
            .iter()
            .any(|ingredient| contains_folded(ingredient, term))
}

fn contains_folded(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(term)
}
