//! Rule expansion and the expansion driver
//!
//! [`Expander::expand_rule`] turns one grammar rule into an [`Entry`];
//! [`Expander::expand_tree`] walks an existing entry tree and expands one
//! more level wherever it finds an unexpanded rule. The caller alternates
//! `expand_tree` with pruning until a pass expands nothing, so branches that
//! cannot match the typed words are dropped before they grow.
//!
//! # Cost bound
//!
//! `expand_tree` stops descending into a sequence once the word index
//! reaches `max_word_index`. This bounds right-recursive grammars. A rule
//! that reaches itself again without consuming a word (left recursion,
//! or a reference cycle) still recurses without limit.

use tracing::{debug, trace};

use super::entry::{CommandSlot, Entry, EntryKind, Sequence, SymbolRef, Word, BLOCK_PLACEHOLDER, UNKNOWN_WORD_COUNT};
use super::query::Query;
use crate::config::EngineConfig;
use crate::grammar::{Grammar, RuleId, RuleKind, SequenceRule, StringRule, TypeName, TypeOperation};
use crate::types::{NameSuggestionProvider, SymbolIndex, TypeId, TypeTable};

/// Outcome of one [`Expander::expand_tree`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStep {
    /// Index of the word following the subtree, or [`UNKNOWN_WORD_COUNT`]
    /// when the subtree's length is ambiguous.
    pub word_index: i32,
    /// Whether anything in the subtree was expanded during this pass.
    pub expanded: bool,
}

impl TreeStep {
    fn settled(word_index: i32) -> Self {
        Self {
            word_index,
            expanded: false,
        }
    }
}

/// Advance a word index by a word count; unknown on either side stays unknown.
fn advance(word_index: i32, count: i32) -> i32 {
    if word_index < 0 || count < 0 {
        UNKNOWN_WORD_COUNT
    } else {
        word_index + count
    }
}

/// Grammar and symbol services shared by every expansion of one request.
pub struct Expander<'a> {
    grammar: &'a Grammar,
    types: &'a TypeTable,
    symbols: &'a dyn SymbolIndex,
    providers: &'a [Box<dyn NameSuggestionProvider>],
    config: &'a EngineConfig,
    query: &'a Query,
}

impl<'a> Expander<'a> {
    pub fn new(
        grammar: &'a Grammar,
        types: &'a TypeTable,
        symbols: &'a dyn SymbolIndex,
        providers: &'a [Box<dyn NameSuggestionProvider>],
        config: &'a EngineConfig,
        query: &'a Query,
    ) -> Self {
        Self {
            grammar,
            types,
            symbols,
            providers,
            config,
            query,
        }
    }

    /// Expand `rule` into `entry`.
    ///
    /// `expand_block` makes a recurrence transparent (used for the block
    /// being completed); nested recurrences become a `...` marker instead.
    /// Returns true if `entry` no longer holds an unexpanded rule or was
    /// turned into a deferred symbol reference.
    pub fn expand_rule(
        &self,
        rule: Option<RuleId>,
        current_type: Option<TypeId>,
        entry: &mut Entry,
        expand_block: bool,
    ) -> bool {
        let Some(rule_id) = rule else {
            return false;
        };
        let Some(kind) = self.grammar.kind(rule_id) else {
            return false;
        };

        let mut expanded = false;
        match kind {
            RuleKind::Real => entry.set_word(Word::pattern("<real>")),
            RuleKind::Integer => entry.set_word(Word::pattern("<integer>")),
            RuleKind::LineString => entry.set_word(Word::pattern("<line-string>")),
            RuleKind::String(string_rule) => {
                expanded = self.expand_string(rule_id, string_rule, entry);
            }
            RuleKind::QuotedString(quoted) => {
                let text = if quoted.file_reference {
                    match quoted.file_type.as_deref() {
                        Some(file_type) if !file_type.is_empty() => format!("<{file_type}-file>"),
                        _ => "<file-path>".to_string(),
                    }
                } else {
                    "<string>".to_string()
                };
                entry.set_word(Word::pattern(text));
            }
            RuleKind::Literal(text) => entry.set_word(Word::literal(text.clone())),
            RuleKind::Delimited => {
                entry.set_word(Word::pattern(format!("<{}>", self.grammar.best_name(rule_id))));
            }
            RuleKind::Sequence(sequence) => {
                // error productions never suggest anything
                if !sequence.error_incomplete {
                    expanded = self.expand_sequence(rule_id, sequence, current_type, entry);
                }
            }
            RuleKind::RuleReference(target)
            | RuleKind::NamedRule(target)
            | RuleKind::Struct(target)
            | RuleKind::Value(target) => {
                return self.expand_rule(*target, current_type, entry, expand_block);
            }
            RuleKind::Recurrence(recurrence) => {
                if expand_block {
                    return self.expand_rule(recurrence.subordinate, current_type, entry, expand_block);
                }
                entry.kind = EntryKind::Sequence(Sequence {
                    children: vec![Entry::word(Word {
                        text: BLOCK_PLACEHOLDER.to_string(),
                        is_pattern: false,
                        block_placeholder: true,
                    })],
                    rule: None,
                    rule_name: String::new(),
                    single_token: false,
                });
            }
            RuleKind::Alternate(alternate) => {
                let children = alternate
                    .children
                    .iter()
                    .map(|&branch| {
                        let mut child = Entry::default();
                        self.expand_rule(Some(branch), current_type, &mut child, false);
                        child
                    })
                    .collect();
                entry.kind = EntryKind::Alternate(children);
            }
            RuleKind::TypeLoad(load) => {
                let target = &load.load_type;
                if load.operation == TypeOperation::Load && target.nested_lookup && target.ordinal.is_none() {
                    if let Some(current) = current_type {
                        entry.kind = EntryKind::TypeChange(self.types.find_nested_symbol(current, &target.path));
                        entry.complete = true;
                        entry.word_count = 0;
                    }
                }
            }
            RuleKind::TypeCommand => {
                let type_rule = current_type.and_then(|current| self.types.rule(current));
                if self.config.expand_type_commands && type_rule.is_some() {
                    expanded = self.expand_rule(type_rule, current_type, entry, false) || expanded;
                }
            }
            RuleKind::Opaque(_) => {}
        }
        expanded || !entry.is_unexpanded()
    }

    /// Only the first child is expanded now, so a leading type change is
    /// seen immediately; the rest stay unexpanded until the driver reaches them.
    fn expand_sequence(
        &self,
        rule_id: RuleId,
        sequence: &SequenceRule,
        current_type: Option<TypeId>,
        entry: &mut Entry,
    ) -> bool {
        let mut expanded = false;
        let mut children = Vec::with_capacity(sequence.children.len());
        for (index, &child_rule) in sequence.children.iter().enumerate() {
            let slot = Some(CommandSlot {
                sequence: rule_id,
                index,
            });
            if index == 0 {
                let mut child = Entry {
                    slot,
                    ..Entry::default()
                };
                expanded = self.expand_rule(Some(child_rule), current_type, &mut child, false) || expanded;
                children.push(child);
            } else {
                children.push(Entry::unexpanded(child_rule, slot));
                expanded = true;
            }
        }
        entry.kind = EntryKind::Sequence(Sequence {
            children,
            rule: Some(rule_id),
            rule_name: self.grammar.best_name(rule_id).to_string(),
            single_token: sequence.single_token,
        });
        expanded
    }

    fn expand_string(&self, rule_id: RuleId, string_rule: &StringRule, entry: &mut Entry) -> bool {
        let mut expanded = false;
        let node_type = string_rule.node_type.as_str();

        // The type a name refers to is often declared by a later sibling
        // `load` rule that points back at this word.
        if let Some(slot) = entry.slot {
            if !entry.is_type_ref() {
                if let Some(load) = self.sibling_type_load(slot) {
                    if load.ordinal == Some(slot.index) {
                        entry.set_type_ref(Some(rule_id), load.path.clone(), load.nested_lookup);
                        expanded = true;
                    }
                }
            }
        }
        if string_rule.flags.lazy_type_reference && !entry.is_type_ref() && !node_type.is_empty() {
            entry.set_type_ref(Some(rule_id), vec![node_type.to_string()], node_type.starts_with('.'));
            expanded = true;
        }
        if string_rule.flags.named && !node_type.is_empty() && !entry.is_name_ref() {
            entry.set_name_ref(Some(rule_id), node_type.to_string());
            expanded = true;
        }

        let placeholder = if string_rule.flags.lazy_type_name {
            format!("<{node_type}-name>")
        } else if !node_type.is_empty() {
            format!("<{node_type}>")
        } else {
            "<string>".to_string()
        };
        match &mut entry.kind {
            EntryKind::Unexpanded(unexpanded) if unexpanded.reference.is_some() => {
                unexpanded.placeholder = placeholder;
            }
            _ => entry.set_word(Word::pattern(placeholder)),
        }
        expanded
    }

    /// First type-load rule following `slot` in its sequence.
    fn sibling_type_load(&self, slot: CommandSlot) -> Option<&'a TypeName> {
        let Some(RuleKind::Sequence(sequence)) = self.grammar.kind(slot.sequence) else {
            return None;
        };
        sequence
            .children
            .iter()
            .skip(slot.index + 1)
            .find_map(|&sibling| match self.grammar.kind(sibling) {
                Some(RuleKind::TypeLoad(load)) => Some(&load.load_type),
                _ => None,
            })
    }

    /// Expand `entry` by (usually) one more level.
    ///
    /// Children of a sequence are visited left to right while the word
    /// index stays below `max_word_index`; a `TypeChange` child switches the
    /// type used for the siblings after it. All branches of an alternate
    /// start at the same index; if they end at different indices the result
    /// is [`UNKNOWN_WORD_COUNT`].
    pub fn expand_tree(
        &self,
        entry: &mut Entry,
        current_type: Option<TypeId>,
        word_index: i32,
        max_word_index: i32,
    ) -> TreeStep {
        if entry.complete {
            if entry.word_count < 0 {
                return TreeStep::settled(entry.word_count);
            }
            return TreeStep::settled(advance(word_index, entry.word_count));
        }

        if entry.is_unexpanded() {
            return self.expand_unexpanded(entry, current_type, word_index);
        }

        match &mut entry.kind {
            EntryKind::Word(_) => TreeStep::settled(advance(word_index, 1)),
            EntryKind::Sequence(sequence) => {
                let child_count = sequence.children.len();
                let mut index = word_index;
                let mut complete = true;
                let mut expanded = false;
                let mut scope = current_type;
                for child in sequence.children.iter_mut() {
                    if index >= max_word_index {
                        break;
                    }
                    if let EntryKind::TypeChange(new_scope) = child.kind {
                        scope = new_scope;
                    }
                    let step = self.expand_tree(child, scope, index, max_word_index);
                    index = step.word_index;
                    expanded |= step.expanded;
                    complete &= child.complete;
                }
                let fits = i32::try_from(child_count).is_ok_and(|count| count <= max_word_index);
                if complete && fits {
                    let count = entry.resolved_word_count();
                    if count >= 0 {
                        entry.word_count = count;
                        entry.complete = true;
                    }
                }
                TreeStep {
                    word_index: index,
                    expanded,
                }
            }
            EntryKind::Alternate(children) => {
                let mut index = word_index;
                let mut complete = true;
                let mut expanded = false;
                for (i, child) in children.iter_mut().enumerate() {
                    let step = self.expand_tree(child, current_type, word_index, max_word_index);
                    if i == 0 {
                        index = step.word_index;
                    } else if index != step.word_index {
                        index = UNKNOWN_WORD_COUNT;
                    }
                    expanded |= step.expanded;
                    complete &= child.complete;
                }
                if complete {
                    entry.word_count = entry.resolved_word_count();
                    entry.complete = true;
                }
                TreeStep {
                    word_index: index,
                    expanded,
                }
            }
            EntryKind::Unexpanded(_) | EntryKind::None | EntryKind::TypeChange(_) => {
                TreeStep::settled(UNKNOWN_WORD_COUNT)
            }
        }
    }

    fn expand_unexpanded(&self, entry: &mut Entry, current_type: Option<TypeId>, word_index: i32) -> TreeStep {
        let mut replacement = entry.clone();
        let mut expanded = false;
        if let EntryKind::Unexpanded(unexpanded) = &entry.kind {
            if unexpanded.reference.is_some() {
                if self.query.fully_expands(word_index) {
                    self.expand_ref_type(&mut replacement, current_type);
                    expanded = true;
                } else {
                    // not enumerated away from the query word
                    replacement.kind = EntryKind::Word(Word::pattern(unexpanded.placeholder.clone()));
                }
            } else {
                expanded = self.expand_rule(unexpanded.rule, current_type, &mut replacement, false);
            }
        }
        *entry = replacement;
        TreeStep {
            word_index: advance(word_index, entry.resolved_word_count()),
            expanded,
        }
    }

    /// Replace a deferred reference with the alternatives it can take.
    ///
    /// The first alternative is always the free-form placeholder; the rest
    /// are the known names for the reference.
    pub fn expand_ref_type(&self, entry: &mut Entry, current_type: Option<TypeId>) {
        let EntryKind::Unexpanded(unexpanded) = &entry.kind else {
            return;
        };
        let Some(reference) = unexpanded.reference.clone() else {
            return;
        };
        let mut children = vec![Entry::word(Word::pattern(unexpanded.placeholder.clone()))];

        let candidates = match &reference {
            SymbolRef::Type { path, nested: true } if !path.is_empty() => self.nested_candidates(&path[0], current_type),
            SymbolRef::Type { path, .. } => {
                let mut names = self.symbols.find_definitions_of_type(path);
                names.extend(self.symbols.base_types(path));
                names
            }
            SymbolRef::Name { kind } => {
                let mut names = self.symbols.find_names(kind);
                for provider in self.providers {
                    provider.suggest_names(kind, &mut names);
                }
                names
            }
        };
        debug!(reference = ?reference, candidates = candidates.len(), "expanded symbol reference");
        children.extend(candidates.into_iter().map(|name| Entry::word(Word::literal(name))));

        entry.kind = EntryKind::Alternate(children);
    }

    /// Symbols of `kind` declared by the current type or any of its bases.
    fn nested_candidates(&self, kind: &str, current_type: Option<TypeId>) -> Vec<String> {
        let Some(current) = current_type else {
            return Vec::new();
        };
        let kind = kind.strip_prefix('.').unwrap_or(kind);
        let kinds: Vec<&str> = if kind == "platform_part" {
            self.config.platform_part_kinds.iter().map(String::as_str).collect()
        } else {
            vec![kind]
        };

        let mut names = Vec::new();
        for ancestor in self.types.ancestry(current) {
            for kind in &kinds {
                names.extend(self.types.symbol_names(ancestor, kind).into_iter().map(str::to_string));
            }
        }
        trace!(kind, found = names.len(), "nested type lookup");
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::query::Operation;
    use crate::grammar::GrammarBuilder;
    use crate::types::{type_path, DefinitionIndex};

    fn query(words: &[&str], active: usize, operation: Operation) -> Query {
        Query {
            words: words.iter().map(|w| w.to_string()).collect(),
            active_word_index: active,
            operation,
        }
    }

    struct Fixture {
        grammar: Grammar,
        types: TypeTable,
        index: DefinitionIndex,
        config: EngineConfig,
        providers: Vec<Box<dyn NameSuggestionProvider>>,
    }

    impl Fixture {
        fn new(grammar: Grammar) -> Self {
            Self {
                grammar,
                types: TypeTable::new(),
                index: DefinitionIndex::new(),
                config: EngineConfig::default(),
                providers: Vec::new(),
            }
        }

        fn expander<'a>(&'a self, query: &'a Query) -> Expander<'a> {
            Expander::new(&self.grammar, &self.types, &self.index, &self.providers, &self.config, query)
        }
    }

    fn words_of(entry: &Entry) -> Vec<String> {
        entry
            .children()
            .iter()
            .filter_map(|c| match &c.kind {
                EntryKind::Word(w) => Some(w.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_leaf_placeholders() {
        let mut b = GrammarBuilder::new();
        let leaves = vec![
            b.real(),
            b.integer(),
            b.line_string(),
            b.string(""),
            b.string("speed"),
            b.type_name("platform"),
            b.quoted_string(),
            b.file_path(None),
            b.file_path(Some("terrain")),
            b.delimited("script"),
        ];
        let root = b.alternate(leaves);
        let fixture = Fixture::new(b.finish(root).unwrap());
        let q = query(&[""], 0, Operation::Syntax);
        let mut entry = Entry::default();
        assert!(fixture.expander(&q).expand_rule(Some(root), None, &mut entry, false));
        assert_eq!(
            words_of(&entry),
            vec![
                "<real>",
                "<integer>",
                "<line-string>",
                "<string>",
                "<speed>",
                "<platform-name>",
                "<string>",
                "<file-path>",
                "<terrain-file>",
                "<script>",
            ]
        );
    }

    #[test]
    fn test_sequence_expands_first_child_only() {
        let mut b = GrammarBuilder::new();
        let head = b.literal("platform");
        let name = b.string("name");
        let seq = b.sequence(vec![head, name]);
        let fixture = Fixture::new(b.finish(seq).unwrap());
        let q = query(&[""], 0, Operation::Syntax);
        let mut entry = Entry::default();
        assert!(fixture.expander(&q).expand_rule(Some(seq), None, &mut entry, false));
        let children = entry.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].kind, EntryKind::Word(Word::literal("platform")));
        assert_eq!(children[0].slot, Some(CommandSlot { sequence: seq, index: 0 }));
        assert!(children[1].is_unexpanded());
    }

    #[test]
    fn test_error_sequence_is_not_expanded() {
        let mut b = GrammarBuilder::new();
        let head = b.literal("bad");
        let seq = b.error_sequence(vec![head]);
        let fixture = Fixture::new(b.finish(seq).unwrap());
        let q = query(&[""], 0, Operation::Syntax);
        let mut entry = Entry::unexpanded(seq, None);
        assert!(!fixture.expander(&q).expand_rule(Some(seq), None, &mut entry, false));
        assert!(entry.is_unexpanded());
    }

    #[test]
    fn test_nested_recurrence_becomes_block_marker() {
        let mut b = GrammarBuilder::new();
        let cmd = b.literal("speed");
        let block = b.recurrence(Some(cmd), "end_mover");
        let fixture = Fixture::new(b.finish(block).unwrap());
        let q = query(&[""], 0, Operation::Syntax);
        let expander = fixture.expander(&q);

        let mut nested = Entry::default();
        expander.expand_rule(Some(block), None, &mut nested, false);
        assert!(nested.children()[0].is_block_placeholder());

        let mut top = Entry::default();
        expander.expand_rule(Some(block), None, &mut top, true);
        assert_eq!(top.kind, EntryKind::Word(Word::literal("speed")));
    }

    #[test]
    fn test_null_reference_leaves_entry_unset() {
        let mut b = GrammarBuilder::new();
        let dangling = b.forward();
        let fixture = Fixture::new(b.finish(dangling).unwrap());
        let q = query(&[""], 0, Operation::Syntax);
        let mut entry = Entry::default();
        assert!(!fixture.expander(&q).expand_rule(Some(dangling), None, &mut entry, false));
        assert_eq!(entry.kind, EntryKind::None);
        assert!(!fixture.expander(&q).expand_rule(None, None, &mut entry, false));
    }

    #[test]
    fn test_sibling_type_load_tags_string_as_type_ref() {
        let mut b = GrammarBuilder::new();
        let head = b.literal("platform");
        let name = b.string("name");
        let kind = b.string("platform-type");
        let load = b.load_from_word(type_path(&["platformType"]), 2);
        let seq = b.sequence(vec![head, name, kind, load]);
        let fixture = Fixture::new(b.finish(seq).unwrap());
        let q = query(&[""], 0, Operation::Syntax);

        let mut entry = Entry::unexpanded(kind, Some(CommandSlot { sequence: seq, index: 2 }));
        fixture.expander(&q).expand_rule(Some(kind), None, &mut entry, false);
        assert_eq!(
            entry.reference(),
            Some(&SymbolRef::Type {
                path: type_path(&["platformType"]),
                nested: false
            })
        );

        let mut other = Entry::unexpanded(name, Some(CommandSlot { sequence: seq, index: 1 }));
        fixture.expander(&q).expand_rule(Some(name), None, &mut other, false);
        assert_eq!(other.kind, EntryKind::Word(Word::pattern("<name>")));
    }

    #[test]
    fn test_expand_tree_stops_at_max_word_index() {
        let mut b = GrammarBuilder::new();
        let words: Vec<_> = ["a", "b", "c"].iter().map(|w| b.literal(*w)).collect();
        let seq = b.sequence(words);
        let fixture = Fixture::new(b.finish(seq).unwrap());
        let q = query(&["a", ""], 1, Operation::Syntax);
        let expander = fixture.expander(&q);
        let mut entry = Entry::default();
        expander.expand_rule(Some(seq), None, &mut entry, true);

        let step = expander.expand_tree(&mut entry, None, 0, 2);
        assert_eq!(step, TreeStep { word_index: 2, expanded: true });
        assert!(entry.children()[2].is_unexpanded());
        assert!(!entry.complete);

        let step = expander.expand_tree(&mut entry, None, 0, 20);
        assert_eq!(step.word_index, 3);
        assert!(entry.complete);
        assert_eq!(entry.word_count, 3);
    }

    #[test]
    fn test_alternate_with_uneven_branches_is_ambiguous() {
        let mut b = GrammarBuilder::new();
        let on = b.literal("on");
        let x = b.literal("x");
        let y = b.literal("y");
        let pair = b.sequence(vec![x, y]);
        let alt = b.alternate(vec![on, pair]);
        let fixture = Fixture::new(b.finish(alt).unwrap());
        let q = query(&[""], 0, Operation::Syntax);
        let expander = fixture.expander(&q);
        let mut entry = Entry::default();
        expander.expand_rule(Some(alt), None, &mut entry, false);

        let first = expander.expand_tree(&mut entry, None, 0, 20);
        assert_eq!(first.word_index, UNKNOWN_WORD_COUNT);
        let second = expander.expand_tree(&mut entry, None, 0, 20);
        assert!(entry.complete);
        assert_eq!(entry.word_count, 2);
        assert_eq!(second.word_index, 2);
    }

    #[test]
    fn test_type_change_scopes_following_siblings() {
        let mut b = GrammarBuilder::new();
        let head = b.literal("edit");
        let load = b.load_nested(type_path(&["mover"]));
        let body = b.type_command();
        let seq = b.sequence(vec![load, head, body]);
        let speed = b.literal("speed");
        let grammar = b.finish(seq).unwrap();

        let mut fixture = Fixture::new(grammar);
        let platform = fixture.types.add_type("platform", None);
        let mover = fixture.types.add_type("mover", None);
        fixture.types.add_symbol(platform, "mover", mover);
        fixture.types.set_rule(mover, speed);

        let q = query(&["edit", ""], 1, Operation::Syntax);
        let expander = fixture.expander(&q);
        let mut entry = Entry::default();
        expander.expand_rule(Some(seq), Some(platform), &mut entry, true);
        assert_eq!(entry.children()[0].kind, EntryKind::TypeChange(Some(mover)));

        expander.expand_tree(&mut entry, Some(platform), 0, 20);
        expander.expand_tree(&mut entry, Some(platform), 0, 20);
        assert_eq!(entry.children()[2].kind, EntryKind::Word(Word::literal("speed")));
        assert_eq!(entry.resolved_word_count(), 2);
    }

    #[test]
    fn test_reference_enumerated_only_at_query_word() {
        let mut b = GrammarBuilder::new();
        let head = b.literal("side");
        let name = b.name_reference("side");
        let seq = b.sequence(vec![head, name]);
        let mut fixture = Fixture::new(b.finish(seq).unwrap());
        fixture.index.add_name("side", "blue");
        fixture.index.add_name("side", "red");

        let q = query(&["side", ""], 1, Operation::Autocomplete);
        let expander = fixture.expander(&q);
        let mut entry = Entry::default();
        expander.expand_rule(Some(seq), None, &mut entry, true);
        expander.expand_tree(&mut entry, None, 0, 2);
        assert!(entry.children()[1].is_name_ref());
        let step = expander.expand_tree(&mut entry, None, 0, 2);
        assert!(step.expanded);
        assert_eq!(words_of(&entry.children()[1]), vec!["<side>", "blue", "red"]);

        let q = query(&["side", ""], 1, Operation::Syntax);
        let expander = fixture.expander(&q);
        let mut entry = Entry::default();
        expander.expand_rule(Some(seq), None, &mut entry, true);
        expander.expand_tree(&mut entry, None, 0, 2);
        expander.expand_tree(&mut entry, None, 0, 2);
        assert_eq!(entry.children()[1].kind, EntryKind::Word(Word::pattern("<side>")));
    }

    struct TeamProvider;

    impl NameSuggestionProvider for TeamProvider {
        fn suggest_names(&self, kind: &str, names: &mut Vec<String>) {
            if kind == "side" {
                names.push("green".to_string());
            }
        }
    }

    #[test]
    fn test_providers_extend_name_candidates() {
        let mut b = GrammarBuilder::new();
        let name = b.name_reference("side");
        let mut fixture = Fixture::new(b.finish(name).unwrap());
        fixture.providers.push(Box::new(TeamProvider));
        fixture.index.add_name("side", "red");
        let q = query(&[""], 0, Operation::Autocomplete);
        let expander = fixture.expander(&q);

        let mut entry = Entry::default();
        expander.expand_rule(Some(name), None, &mut entry, false);
        expander.expand_ref_type(&mut entry, None);
        assert_eq!(words_of(&entry), vec!["<side>", "red", "green"]);
    }

    #[test]
    fn test_platform_part_unions_member_kinds() {
        let mut b = GrammarBuilder::new();
        let part = b.type_reference(".platform_part");
        let mut fixture = Fixture::new(b.finish(part).unwrap());
        let platform = fixture.types.add_type("platform", None);
        fixture.types.declare(platform, "sensors", "RADAR_1", None);
        fixture.types.declare(platform, "weapons", "AIM_9", None);
        fixture.types.declare(platform, "signatures", "IGNORED", None);

        let q = query(&[""], 0, Operation::Autocomplete);
        let expander = fixture.expander(&q);
        let mut entry = Entry::default();
        expander.expand_rule(Some(part), Some(platform), &mut entry, false);
        expander.expand_ref_type(&mut entry, Some(platform));
        assert_eq!(words_of(&entry), vec!["<.platform_part>", "AIM_9", "RADAR_1"]);
    }
}
