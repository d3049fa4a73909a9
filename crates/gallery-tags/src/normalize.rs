//! Search-key normalization.

use unicode_normalization::UnicodeNormalization;

/// Normalize text for search matching and name comparison.
///
/// - NFKC compatibility fold, so full-width ASCII and half-width katakana
///   collapse onto their canonical forms
/// - Unicode lowercase
/// - whitespace trimmed and collapsed to single spaces
pub fn normalize_search(input: &str) -> String {
    let folded: String = input.nfkc().collect();
    collapse_whitespace(&folded.to_lowercase())
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
