//! Removing branches that contradict the typed words
//!
//! A word that does not match the query at its position kills the sequence
//! containing it; an alternate dies once all of its branches are gone.
//! Patterns (`<integer>`, ...) and entries not expanded yet always survive,
//! as does anything past the last typed word.

use super::entry::{Entry, EntryKind};
use super::query::Query;

/// Prune the subtree in `slot` anchored at `word_index`, clearing the slot
/// if nothing viable remains.
pub fn prune(query: &Query, word_index: usize, slot: &mut Option<Entry>) {
    if let Some(entry) = slot {
        if !retain(query, word_index, entry) {
            *slot = None;
        }
    }
}

/// Prune `entry` in place; returns false if the entry itself must go.
pub fn retain(query: &Query, word_index: usize, entry: &mut Entry) -> bool {
    if word_index >= query.words.len() {
        return true;
    }
    match &mut entry.kind {
        EntryKind::None => false,
        EntryKind::Word(word) => word.is_pattern || query.text_matches(&word.text, word_index),
        EntryKind::Unexpanded(_) | EntryKind::TypeChange(_) => true,
        EntryKind::Alternate(children) => {
            children.retain_mut(|child| retain(query, word_index, child));
            !children.is_empty()
        }
        EntryKind::Sequence(sequence) => {
            let mut index = word_index;
            for child in sequence.children.iter_mut() {
                if !retain(query, index, child) {
                    return false;
                }
                match usize::try_from(child.resolved_word_count()) {
                    Ok(count) => index += count,
                    Err(_) => break,
                }
            }
            true
        }
    }
}
