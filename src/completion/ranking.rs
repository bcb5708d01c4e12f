//! Ordering of suggestion lists
//!
//! Ranking rules (in order of priority):
//! 1. Placeholders first: `<` sorts before every other character
//! 2. Case-insensitive character order
//! 3. Exact byte order, as tie-breaker
//!
//! Exact duplicates are removed after sorting.

use std::cmp::Ordering;

/// Sort key of one byte: `<` first, then ASCII case-folded order.
fn rank_byte(c: u8) -> u16 {
    if c == b'<' {
        0
    } else {
        1 + u16::from(c.to_ascii_lowercase())
    }
}

/// Compare two suggestions by the ranking rules above.
pub fn compare_suggestions(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(rank_byte)
        .cmp(b.bytes().map(rank_byte))
        // Tie-breaker: exact order
        .then_with(|| a.cmp(b))
}

/// Sort `suggestions` best first and drop duplicates.
pub fn rank_suggestions(mut suggestions: Vec<String>) -> Vec<String> {
    suggestions.sort_by(|a, b| compare_suggestions(a, b));
    suggestions.dedup();
    suggestions
}
