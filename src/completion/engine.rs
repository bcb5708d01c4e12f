//! Request-level entry points: suggestions and syntax hints

use serde::Serialize;
use tracing::debug;

use super::collect::{collect_suggestions, collect_syntax, concrete_word_count, Syntax};
use super::entry::{Entry, EntryKind, Word};
use super::expand::Expander;
use super::include::include_suggestions;
use super::prune::prune;
use super::query::{digest_input, Operation, Query};
use super::ranking::rank_suggestions;
use crate::config::EngineConfig;
use crate::grammar::{Grammar, RuleId};
use crate::types::{NameSuggestionProvider, SymbolIndex, TypeId, TypeTable};

/// One completion or syntax request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Text of the command being typed, starting at the beginning of the command.
    pub text: String,
    /// Byte offset of the cursor in `text`.
    pub cursor: usize,
    /// Enclosing blocks, innermost first. Empty means the grammar root.
    pub blocks: Vec<RuleId>,
    /// Type scope the cursor sits in, used for nested lookups.
    pub current_type: Option<TypeId>,
}

impl CompletionRequest {
    pub fn new(text: impl Into<String>, cursor: usize) -> Self {
        Self {
            text: text.into(),
            cursor,
            ..Self::default()
        }
    }

    /// Request with the cursor at the end of `text`.
    pub fn at_end(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self::new(text, cursor)
    }

    pub fn in_blocks(mut self, blocks: Vec<RuleId>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn with_type(mut self, current_type: Option<TypeId>) -> Self {
        self.current_type = current_type;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AutocompleteResult {
    pub suggestions: Vec<String>,
    /// Byte offset where a chosen suggestion is inserted.
    pub insert_position: usize,
    /// Bytes of existing text the suggestion replaces.
    pub replace_length: usize,
    /// No path continues past the completed word.
    pub is_last_token: bool,
    /// The suggestion is a prefix the user keeps typing after (a directory).
    pub is_partial_token: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyntaxResult {
    pub active_word_index: usize,
    pub concrete_word_count: usize,
    pub sequences: Vec<Syntax>,
}

impl SyntaxResult {
    /// Hints are only worth showing while the cursor is still inside the
    /// concrete words, before any nested block.
    pub fn is_within_concrete_words(&self) -> bool {
        self.active_word_index <= self.concrete_word_count
    }
}

/// Grammar-driven autocomplete and syntax hints.
///
/// Holds read-only views of the grammar and symbol tables; requests do
/// not mutate any shared state, so one engine can serve several threads.
///
/// # Example
///
/// ```
/// use syntax_assist::completion::{AutoComplete, CompletionRequest};
/// use syntax_assist::config::EngineConfig;
/// use syntax_assist::grammar::GrammarBuilder;
/// use syntax_assist::types::{DefinitionIndex, TypeTable};
///
/// let mut b = GrammarBuilder::new();
/// let on = b.literal("on");
/// let off = b.literal("off");
/// let root = b.alternate(vec![on, off]);
/// let grammar = b.finish(root).unwrap();
/// let types = TypeTable::new();
/// let index = DefinitionIndex::new();
///
/// let engine = AutoComplete::new(&grammar, &types, &index, EngineConfig::default());
/// let result = engine.get_suggestions(&CompletionRequest::at_end("o"));
/// assert_eq!(result.suggestions, vec!["off", "on"]);
/// ```
pub struct AutoComplete<'a> {
    grammar: &'a Grammar,
    types: &'a TypeTable,
    symbols: &'a dyn SymbolIndex,
    providers: Vec<Box<dyn NameSuggestionProvider>>,
    config: EngineConfig,
}

impl<'a> AutoComplete<'a> {
    pub fn new(
        grammar: &'a Grammar,
        types: &'a TypeTable,
        symbols: &'a dyn SymbolIndex,
        config: EngineConfig,
    ) -> Self {
        Self {
            grammar,
            types,
            symbols,
            providers: Vec::new(),
            config,
        }
    }

    /// Register an extra source of name candidates.
    pub fn with_provider(mut self, provider: Box<dyn NameSuggestionProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Candidate words for the word at the cursor.
    pub fn get_suggestions(&self, request: &CompletionRequest) -> AutocompleteResult {
        let digested = digest_input(
            &request.text,
            request.cursor,
            Operation::Autocomplete,
            &self.config.include_commands,
        );
        let query = &digested.query;
        let mut result = AutocompleteResult {
            insert_position: digested.replace_start,
            replace_length: digested.replace_length(),
            is_last_token: true,
            ..AutocompleteResult::default()
        };

        if query.is_include(&self.config.include_commands) {
            let text = query.words.get(1).map(String::as_str).unwrap_or_default();
            let include = include_suggestions(&self.config, text);
            result.suggestions = include.suggestions;
            result.is_partial_token = include.is_partial_token;
            debug!(count = result.suggestions.len(), "include suggestions");
            return result;
        }

        let max_word_index = i32::try_from(query.words.len()).unwrap_or(i32::MAX);
        if let Some(root) = self.expand(query, request, max_word_index) {
            let mut suggestions = Vec::new();
            let remaining = i64::try_from(query.active_word_index).unwrap_or(i64::MAX);
            collect_suggestions(self.grammar, &root, remaining, &mut suggestions, &mut result.is_last_token);
            result.suggestions = rank_suggestions(suggestions);
        }
        debug!(
            words = ?query.words,
            count = result.suggestions.len(),
            last_token = result.is_last_token,
            "autocomplete"
        );
        result
    }

    /// Syntax hints for the command being typed.
    pub fn get_syntax(&self, request: &CompletionRequest) -> SyntaxResult {
        let digested = digest_input(&request.text, request.cursor, Operation::Syntax, &self.config.include_commands);
        let mut query = digested.query;
        let mut result = SyntaxResult {
            active_word_index: query.active_word_index,
            ..SyntaxResult::default()
        };

        // the command word itself gets no hint: show what may follow it
        if query.active_word_index < 1 {
            if query.words.is_empty() {
                return result;
            }
            if query.words.len() == 1 {
                query.words.push(String::new());
            }
            query.active_word_index = 1;
        }

        if let Some(root) = self.expand(&query, request, self.config.max_syntax_word_index) {
            let mut sequences = collect_syntax(&root, true, self.config.max_syntax_list_size);
            sequences.sort();
            sequences.dedup();
            result.concrete_word_count = concrete_word_count(&sequences);
            result.sequences = sequences;
        }
        debug!(
            words = ?query.words,
            count = result.sequences.len(),
            concrete = result.concrete_word_count,
            "syntax"
        );
        result
    }

    /// Seed the tree from the enclosing blocks and expand it to a fixed point.
    fn expand(&self, query: &Query, request: &CompletionRequest, max_word_index: i32) -> Option<Entry> {
        let expander = Expander::new(
            self.grammar,
            self.types,
            self.symbols,
            &self.providers,
            &self.config,
            query,
        );

        let mut root = Some(self.seed(&expander, query, request));
        let mut passes = 0;
        while let Some(entry) = root.as_mut() {
            let step = expander.expand_tree(entry, request.current_type, 0, max_word_index);
            prune(query, 0, &mut root);
            passes += 1;
            if !step.expanded {
                break;
            }
        }
        debug!(passes, alive = root.is_some(), "expansion finished");
        root
    }

    /// Alternatives valid at the start of a command, innermost block first.
    ///
    /// A block with an end keyword also offers that keyword and hides the
    /// blocks around it; a block without one lets the next block out
    /// contribute too.
    fn seed(&self, expander: &Expander<'_>, query: &Query, request: &CompletionRequest) -> Entry {
        let blocks: Vec<Option<RuleId>> = if request.blocks.is_empty() {
            vec![self.grammar.root()]
        } else {
            request.blocks.iter().copied().map(Some).collect()
        };

        let mut alternatives = Vec::new();
        for block in blocks {
            let mut slot = Entry::default();
            expander.expand_rule(block, request.current_type, &mut slot, true);

            let end_keyword = block.and_then(|b| self.grammar.end_keyword(b));
            if let Some(end_keyword) = end_keyword.filter(|keyword| !keyword.is_empty()) {
                let terminator = Entry::word(Word::literal(end_keyword));
                if let EntryKind::Alternate(children) = &mut slot.kind {
                    children.push(terminator);
                } else {
                    slot = Entry::alternate(vec![slot, terminator]);
                }
            }

            let mut slot = Some(slot);
            prune(query, 0, &mut slot);
            alternatives.extend(slot);

            // only a block without an end keyword is transparent
            if end_keyword != Some("") {
                break;
            }
        }
        Entry::alternate(alternatives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarBuilder;
    use crate::types::DefinitionIndex;

    #[test]
    fn test_request_builders() {
        let request = CompletionRequest::at_end("platform ").in_blocks(vec![RuleId(3)]);
        assert_eq!(request.cursor, 9);
        assert_eq!(request.blocks, vec![RuleId(3)]);
        assert_eq!(request.current_type, None);
    }

    #[test]
    fn test_within_concrete_words() {
        let result = SyntaxResult {
            active_word_index: 2,
            concrete_word_count: 2,
            sequences: Vec::new(),
        };
        assert!(result.is_within_concrete_words());
    }

    #[test]
    fn test_empty_grammar_yields_nothing() {
        let grammar = Grammar::default();
        let types = TypeTable::new();
        let index = DefinitionIndex::new();
        let engine = AutoComplete::new(&grammar, &types, &index, EngineConfig::default());
        let result = engine.get_suggestions(&CompletionRequest::at_end("x"));
        assert!(result.suggestions.is_empty());
        assert!(engine.get_syntax(&CompletionRequest::at_end("x ")).sequences.is_empty());
    }

    #[test]
    fn test_block_end_keyword_offered_and_outer_blocks_hidden() {
        let mut b = GrammarBuilder::new();
        let speed = b.literal("speed");
        let inner = b.recurrence(Some(speed), "end_mover");
        let platform = b.literal("platform");
        let outer = b.recurrence(Some(platform), "");
        let grammar = b.finish(outer).unwrap();
        let types = TypeTable::new();
        let index = DefinitionIndex::new();
        let engine = AutoComplete::new(&grammar, &types, &index, EngineConfig::default());

        let result = engine.get_suggestions(&CompletionRequest::at_end("").in_blocks(vec![inner, outer]));
        assert_eq!(result.suggestions, vec!["end_mover", "speed"]);
    }

    #[test]
    fn test_transparent_block_lets_outer_block_contribute() {
        let mut b = GrammarBuilder::new();
        let speed = b.literal("speed");
        let inner = b.recurrence(Some(speed), "");
        let platform = b.literal("platform");
        let outer = b.recurrence(Some(platform), "end_scenario");
        let grammar = b.finish(outer).unwrap();
        let types = TypeTable::new();
        let index = DefinitionIndex::new();
        let engine = AutoComplete::new(&grammar, &types, &index, EngineConfig::default());

        let result = engine.get_suggestions(&CompletionRequest::at_end("").in_blocks(vec![inner, outer]));
        assert_eq!(result.suggestions, vec!["end_scenario", "platform", "speed"]);
    }
}
