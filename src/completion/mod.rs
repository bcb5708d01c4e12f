//! Grammar-driven completion
//!
//! This module provides:
//! - Tokenizing the command under the cursor into query words
//! - Lazy, level-by-level grammar expansion interleaved with pruning
//! - Symbol-aware suggestions for type and name references
//! - Syntax hints with bounded combinatorial growth
//! - File-system completion for include commands
//!
//! # Architecture
//!
//! A request builds an [`entry::Entry`] tree seeded from the enclosing
//! blocks. [`expand::Expander`] grows it one level per pass and
//! [`prune::prune`] removes branches contradicting the typed words,
//! until a pass expands nothing. [`collect`] then reads the suggestions or
//! syntax hints out of what survived.

pub mod collect;
pub mod engine;
pub mod entry;
pub mod expand;
pub mod include;
pub mod prune;
pub mod query;
pub mod ranking;

pub use collect::{collect_suggestions, collect_syntax, concrete_word_count, join_syntax, Syntax};
pub use engine::{AutoComplete, AutocompleteResult, CompletionRequest, SyntaxResult};
pub use include::{include_suggestions, IncludeSuggestions};
pub use query::{digest_input, DigestedInput, Operation, Query};
pub use ranking::{compare_suggestions, rank_suggestions};
