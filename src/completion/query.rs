//! Splitting raw input into the words that drive completion
//!
//! The text is split on spaces, tabs, carriage returns and newlines. The
//! word containing (or ending at) the cursor is the *query word*. When the
//! cursor sits between words, an empty query word is synthesized there.
//! Words after the query word are dropped: only the prefix ending at the
//! cursor's word drives expansion.

use tracing::trace;

/// What a request computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Autocomplete,
    Syntax,
}

/// The words of one request and the index of the word being completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub words: Vec<String>,
    pub active_word_index: usize,
    pub operation: Operation,
}

impl Query {
    /// Exact match for words before the query word, prefix match at it.
    /// Positions past the typed words always match.
    pub fn text_matches(&self, text: &str, word_index: usize) -> bool {
        match self.words.get(word_index) {
            Some(word) if word_index == self.active_word_index => prefix_matches(text, word),
            Some(word) => text == word,
            None => true,
        }
    }

    /// Type and name references are only enumerated at the word being
    /// completed; everywhere else they stay a generic pattern.
    pub fn fully_expands(&self, word_index: i32) -> bool {
        self.operation == Operation::Autocomplete
            && usize::try_from(word_index).is_ok_and(|i| i == self.active_word_index)
    }

    /// True if the first word is one of `include_commands`.
    pub fn is_include(&self, include_commands: &[String]) -> bool {
        self.words
            .first()
            .is_some_and(|first| include_commands.iter().any(|c| c == first))
    }
}

/// True if the shorter of `text` and `query` is a prefix of the other.
pub fn prefix_matches(text: &str, query: &str) -> bool {
    text.bytes().zip(query.bytes()).all(|(a, b)| a == b)
}

/// Tokenizer output: the query plus the character span a suggestion replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestedInput {
    pub query: Query,
    pub replace_start: usize,
    pub replace_end: usize,
}

impl DigestedInput {
    pub fn replace_length(&self) -> usize {
        self.replace_end.saturating_sub(self.replace_start)
    }
}

fn is_separator(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r')
}

/// Split `text` around byte offset `cursor` into words and locate the query word.
///
/// In [`Operation::Autocomplete`] mode the query word's text is cleared
/// (completion anchors at the start of the word) unless the input is an
/// include command, whose path argument is completed by prefix.
pub fn digest_input(
    text: &str,
    cursor: usize,
    operation: Operation,
    include_commands: &[String],
) -> DigestedInput {
    let bytes = text.as_bytes();
    let mut words: Vec<String> = Vec::new();
    let mut word_text: Vec<u8> = Vec::new();
    let mut word_start = 0;
    let mut found: Option<(usize, usize, usize)> = None;

    for i in 0..=bytes.len() {
        let c = bytes.get(i).copied().unwrap_or(b' ');
        if is_separator(c) {
            if !word_text.is_empty() {
                if found.is_none() && cursor <= i {
                    found = Some((words.len(), word_start, i));
                }
                words.push(String::from_utf8_lossy(&word_text).into_owned());
                word_text.clear();
            }
        } else {
            if word_text.is_empty() {
                word_start = i;
                if found.is_none() && cursor < i {
                    // the cursor sits before this word: the user starts a new one
                    found = Some((words.len(), cursor, cursor));
                    words.push(String::new());
                    break;
                }
            }
            if i < cursor {
                word_text.push(c);
            }
        }
    }

    let (active_word_index, replace_start, replace_end) = match found {
        Some(found) => found,
        None => {
            words.push(String::new());
            (words.len() - 1, cursor, cursor)
        }
    };
    words.truncate(active_word_index + 1);

    let mut query = Query {
        words,
        active_word_index,
        operation,
    };
    if operation == Operation::Autocomplete && !query.is_include(include_commands) {
        if let Some(last) = query.words.last_mut() {
            last.clear();
        }
    }
    trace!(
        words = ?query.words,
        active = query.active_word_index,
        replace_start,
        replace_end,
        "digested input"
    );

    DigestedInput {
        query,
        replace_start,
        replace_end,
    }
}
