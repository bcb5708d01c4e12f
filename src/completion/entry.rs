//! Working tree built while expanding the grammar for one request
//!
//! Each [`Entry`] is one (partially) expanded grammar position. Sequences and
//! alternates own their children outright; replacing a node means assigning
//! a new value in place. The whole tree is dropped at the end of the request.
//!
//! Word counts use `-1` for "not known yet": an unexpanded rule, or any
//! parent containing one. A known count never depends on an unknown one.

use crate::grammar::RuleId;
use crate::types::{TypeId, TypePath};

/// Word count of a subtree whose length is not known yet.
pub const UNKNOWN_WORD_COUNT: i32 = -1;

/// Text of the marker emitted for a nested block.
pub const BLOCK_PLACEHOLDER: &str = "...";

/// A symbol-table lookup deferred until the word is completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolRef {
    /// Type names of `path`; `nested` resolves inside the current type.
    Type { path: TypePath, nested: bool },
    /// Declared names of `kind`.
    Name { kind: String },
}

/// A candidate word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    /// Placeholder such as `<integer>` that matches any typed text.
    pub is_pattern: bool,
    /// `...` marker standing for a nested block's contents.
    pub block_placeholder: bool,
}

impl Word {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_pattern: false,
            block_placeholder: false,
        }
    }

    pub fn pattern(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_pattern: true,
            block_placeholder: false,
        }
    }
}

/// A rule not expanded yet, possibly tagged with a deferred lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unexpanded {
    pub rule: Option<RuleId>,
    pub reference: Option<SymbolRef>,
    /// Placeholder shown for a reference that is not enumerated.
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub children: Vec<Entry>,
    /// Grammar rule the sequence was expanded from; `None` for block markers.
    pub rule: Option<RuleId>,
    pub rule_name: String,
    pub single_token: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Nothing expanded into this entry.
    None,
    Word(Word),
    Unexpanded(Unexpanded),
    Sequence(Sequence),
    Alternate(Vec<Entry>),
    /// Switch the current type for following siblings; consumes no words.
    TypeChange(Option<TypeId>),
}

/// Position of an entry inside the grammar sequence that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSlot {
    pub sequence: RuleId,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    pub word_count: i32,
    pub complete: bool,
    pub slot: Option<CommandSlot>,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            kind: EntryKind::None,
            word_count: UNKNOWN_WORD_COUNT,
            complete: false,
            slot: None,
        }
    }
}

impl Entry {
    /// A complete single-word entry.
    pub fn word(word: Word) -> Self {
        let mut entry = Self::default();
        entry.set_word(word);
        entry
    }

    pub fn unexpanded(rule: RuleId, slot: Option<CommandSlot>) -> Self {
        Self {
            kind: EntryKind::Unexpanded(Unexpanded {
                rule: Some(rule),
                reference: None,
                placeholder: String::new(),
            }),
            slot,
            ..Self::default()
        }
    }

    pub fn alternate(children: Vec<Entry>) -> Self {
        Self {
            kind: EntryKind::Alternate(children),
            ..Self::default()
        }
    }

    /// Turn this entry into a complete word, keeping its slot.
    pub fn set_word(&mut self, word: Word) {
        self.kind = EntryKind::Word(word);
        self.complete = true;
        self.word_count = 1;
    }

    /// Defer this one-word entry to a symbol lookup.
    ///
    /// A trailing `$variable` segment names a runtime variable rather than a
    /// static type and is dropped from the path.
    pub fn set_type_ref(&mut self, rule: Option<RuleId>, mut path: TypePath, nested: bool) {
        if path.last().is_some_and(|segment| segment.starts_with('$')) {
            path.pop();
        }
        self.set_reference(rule, SymbolRef::Type { path, nested });
    }

    /// Defer this one-word entry to a name lookup.
    ///
    /// An entry already tagged as a type reference keeps its type lookup,
    /// now keyed by the name kind.
    pub fn set_name_ref(&mut self, rule: Option<RuleId>, kind: String) {
        let reference = match self.reference() {
            Some(SymbolRef::Type { .. }) => SymbolRef::Type {
                path: vec![kind],
                nested: false,
            },
            _ => SymbolRef::Name { kind },
        };
        self.set_reference(rule, reference);
    }

    fn set_reference(&mut self, rule: Option<RuleId>, reference: SymbolRef) {
        let placeholder = match &self.kind {
            EntryKind::Unexpanded(u) => u.placeholder.clone(),
            _ => String::new(),
        };
        self.kind = EntryKind::Unexpanded(Unexpanded {
            rule,
            reference: Some(reference),
            placeholder,
        });
        self.word_count = 1;
        self.complete = false;
    }

    pub fn reference(&self) -> Option<&SymbolRef> {
        match &self.kind {
            EntryKind::Unexpanded(u) => u.reference.as_ref(),
            _ => None,
        }
    }

    pub fn is_type_ref(&self) -> bool {
        matches!(self.reference(), Some(SymbolRef::Type { .. }))
    }

    pub fn is_name_ref(&self) -> bool {
        matches!(self.reference(), Some(SymbolRef::Name { .. }))
    }

    pub fn is_unexpanded(&self) -> bool {
        matches!(self.kind, EntryKind::Unexpanded(_))
    }

    pub fn is_block_placeholder(&self) -> bool {
        matches!(&self.kind, EntryKind::Word(w) if w.block_placeholder)
    }

    pub fn children(&self) -> &[Entry] {
        match &self.kind {
            EntryKind::Sequence(seq) => &seq.children,
            EntryKind::Alternate(children) => children,
            _ => &[],
        }
    }

    /// Words this subtree consumes, or [`UNKNOWN_WORD_COUNT`].
    ///
    /// A sequence sums its children; an alternate takes its longest branch.
    pub fn resolved_word_count(&self) -> i32 {
        if self.complete {
            return self.word_count;
        }
        match &self.kind {
            EntryKind::Word(_) => 1,
            EntryKind::Sequence(seq) => {
                let mut sum = 0;
                for child in &seq.children {
                    let count = child.resolved_word_count();
                    if count < 0 {
                        return count;
                    }
                    sum += count;
                }
                sum
            }
            EntryKind::Alternate(children) => {
                let mut max = 0;
                for child in children {
                    let count = child.resolved_word_count();
                    if count < 0 {
                        return count;
                    }
                    max = max.max(count);
                }
                max
            }
            EntryKind::Unexpanded(_) | EntryKind::None | EntryKind::TypeChange(_) => UNKNOWN_WORD_COUNT,
        }
    }
}
