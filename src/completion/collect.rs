//! Reading suggestions and syntax hints out of a pruned entry tree

use super::entry::{Entry, EntryKind, BLOCK_PLACEHOLDER};
use crate::grammar::{Grammar, RuleKind};

/// Word position one past the query word along the current path.
///
/// Walking a sequence subtracts each child's word count from the remaining
/// distance; an unknown count (`-1`) adds one instead, so arithmetic keeps
/// working on the far side of the query word.
pub const PAST_QUERY_WORD: i64 = -1;

/// One syntax hint: the words of a command, patterns and `...` included.
pub type Syntax = Vec<String>;

/// Gather the candidate words found `remaining` words into `entry`.
///
/// `last_token` is cleared when some path continues past the query word,
/// i.e. the suggested word would not finish the command.
pub fn collect_suggestions(
    grammar: &Grammar,
    entry: &Entry,
    remaining: i64,
    suggestions: &mut Vec<String>,
    last_token: &mut bool,
) {
    if remaining == PAST_QUERY_WORD {
        if !entry.is_block_placeholder() {
            *last_token = false;
        }
        return;
    }

    match &entry.kind {
        EntryKind::Word(word) => {
            if remaining != 0 || word.block_placeholder || word.text.is_empty() {
                return;
            }
            // a literal starting with '<' would read as a pattern
            let mut text = if word.text.starts_with('<') && !word.is_pattern {
                format!("\\{}", word.text)
            } else {
                word.text.clone()
            };
            if let Some(terminator) = find_suggestion_terminator(grammar, entry) {
                text.push_str(BLOCK_PLACEHOLDER);
                text.push_str(terminator);
            }
            suggestions.push(text);
        }
        EntryKind::Alternate(children) => {
            for child in children {
                collect_suggestions(grammar, child, remaining, suggestions, last_token);
            }
        }
        EntryKind::Sequence(sequence) => {
            let mut remaining = remaining;
            for child in &sequence.children {
                collect_suggestions(grammar, child, remaining, suggestions, last_token);
                remaining -= i64::from(child.resolved_word_count());
            }
        }
        EntryKind::None | EntryKind::Unexpanded(_) | EntryKind::TypeChange(_) => {}
    }
}

/// End keyword of the block opened by the command `entry` starts.
///
/// Applies to the first word of a command of at least three elements
/// whose block is either second to last (followed by its end keyword) or
/// last (consuming the end keyword itself).
pub fn find_suggestion_terminator<'g>(grammar: &'g Grammar, entry: &Entry) -> Option<&'g str> {
    let slot = entry.slot?;
    if slot.index != 0 {
        return None;
    }
    let Some(RuleKind::Sequence(sequence)) = grammar.kind(slot.sequence) else {
        return None;
    };
    let len = sequence.children.len();
    if len < 3 {
        return None;
    }
    sequence.children[len - 2..]
        .iter()
        .find_map(|&child| match grammar.kind(child) {
            Some(RuleKind::Recurrence(recurrence)) if !recurrence.end_keyword.is_empty() => {
                Some(recurrence.end_keyword.as_str())
            }
            _ => None,
        })
}

/// All the word sequences `entry` can produce, capped at `max_list_size`
/// combinations per join.
///
/// `first_word` is true while nothing has been emitted to the left; a
/// single-token sequence anywhere else renders as `<name>`.
pub fn collect_syntax(entry: &Entry, first_word: bool, max_list_size: usize) -> Vec<Syntax> {
    match &entry.kind {
        EntryKind::Word(word) => vec![vec![word.text.clone()]],
        EntryKind::Alternate(children) => {
            let mut result: Vec<Syntax> = Vec::new();
            let mut previous: Option<Vec<Syntax>> = None;
            for child in children {
                let syntax = collect_syntax(child, first_word, max_list_size);
                if previous.as_ref() != Some(&syntax) {
                    result.extend(syntax.iter().cloned());
                }
                previous = Some(syntax);
            }
            result
        }
        EntryKind::Sequence(sequence) => {
            if !first_word && sequence.rule.is_some() && sequence.single_token && !sequence.rule_name.is_empty() {
                return vec![vec![format!("<{}>", sequence.rule_name)]];
            }
            let mut result = Vec::new();
            for (i, child) in sequence.children.iter().enumerate() {
                let rhs = collect_syntax(child, first_word && i == 0, max_list_size);
                result = join_syntax(result, rhs, max_list_size);
            }
            result
        }
        EntryKind::None | EntryKind::Unexpanded(_) | EntryKind::TypeChange(_) => Vec::new(),
    }
}

/// Cartesian concatenation of two syntax lists.
///
/// When the product would exceed `max_list_size` the right-hand side is
/// collapsed first, out to its longest alternative: a position keeps its
/// word if every alternative reaching it agrees, and becomes `<...>`
/// otherwise. Every prefix of the collapsed list whose length matches one
/// of the original alternatives is then appended to each left-hand
/// sequence.
pub fn join_syntax(lhs: Vec<Syntax>, rhs: Vec<Syntax>, max_list_size: usize) -> Vec<Syntax> {
    if lhs.is_empty() {
        return rhs;
    }
    if rhs.is_empty() {
        return lhs;
    }

    if lhs.len().saturating_mul(rhs.len()) > max_list_size {
        let longest = rhs.iter().map(Vec::len).max().unwrap_or(0);
        let collapsed: Syntax = (0..longest)
            .map(|j| {
                let mut words = rhs.iter().filter_map(|alternative| alternative.get(j));
                match words.next() {
                    Some(first) if words.all(|word| word == first) => first.clone(),
                    _ => "<...>".to_string(),
                }
            })
            .collect();
        let lengths: Vec<usize> = rhs.iter().map(Vec::len).collect();

        let mut result = Vec::new();
        for word_count in 1..=collapsed.len() {
            if !lengths.contains(&word_count) {
                continue;
            }
            let suffix = &collapsed[..word_count];
            for left in &lhs {
                let mut joined = left.clone();
                joined.extend_from_slice(suffix);
                result.push(joined);
            }
        }
        return result;
    }

    let mut result = Vec::with_capacity(lhs.len() * rhs.len());
    for right in &rhs {
        for left in &lhs {
            let mut joined = left.clone();
            joined.extend_from_slice(right);
            result.push(joined);
        }
    }
    result
}

/// Number of words the hints show before the command opens a block.
///
/// `platform <name> <type> ... end_platform` has three. A hint without a
/// `...` marker counts in full; the largest count wins.
pub fn concrete_word_count(sequences: &[Syntax]) -> usize {
    sequences
        .iter()
        .map(|sequence| {
            sequence
                .iter()
                .position(|word| word == BLOCK_PLACEHOLDER)
                .unwrap_or(sequence.len())
        })
        .max()
        .unwrap_or(0)
}
