//! Grammar rule tree consumed by the completion engine
//!
//! The grammar is owned by the caller and is never mutated by the engine.
//! Rules live in an arena (`Grammar`) and refer to each other through
//! `RuleId` handles, so recursive grammars (a rule reference that points
//! back at one of its ancestors) are representable without shared
//! ownership or cycles of owning pointers.
//!
//! # Rule kinds
//!
//! `RuleKind` is a closed sum type: the rule expander matches on it
//! exhaustively, so adding a kind forces every consumer to decide how
//! to handle it.

pub mod builder;

pub use builder::GrammarBuilder;

use thiserror::Error;

use crate::types::TypePath;

/// Handle to a rule stored in a [`Grammar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub(crate) usize);

impl RuleId {
    /// Position of the rule inside its grammar arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Flags carried by a bare-string leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringFlags {
    /// Value names a type that is resolved lazily against the type tables.
    pub lazy_type_reference: bool,
    /// Value names a declaration looked up in the flat name tables.
    pub named: bool,
    /// Value declares the name of a new type of the leaf's kind.
    pub lazy_type_name: bool,
}

/// A whitespace-delimited string leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringRule {
    /// Kind of the node produced for this leaf (e.g. `platform_type`).
    pub node_type: String,
    pub flags: StringFlags,
}

/// A quoted string leaf, optionally naming a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotedStringRule {
    pub file_reference: bool,
    /// File kind used in the placeholder (`<kind-file>`), if known.
    pub file_type: Option<String>,
}

/// AND-composition of rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceRule {
    pub children: Vec<RuleId>,
    /// The whole sequence is displayed as one token in syntax hints.
    pub single_token: bool,
    /// The sequence only exists to report an incomplete-command error.
    pub error_incomplete: bool,
}

/// OR-composition of rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlternateRule {
    pub children: Vec<RuleId>,
}

/// A repeated block of commands, optionally closed by an end keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub subordinate: Option<RuleId>,
    /// Keyword closing the block (`end_platform`); empty if unterminated.
    pub end_keyword: String,
}

/// Operation a type-load rule performs on the type tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeOperation {
    #[default]
    Load,
    Create,
    Delete,
}

/// Reference to the type a type-load rule acts on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeName {
    pub path: TypePath,
    /// Resolve `path` inside the current type rather than globally.
    pub nested_lookup: bool,
    /// Index of the sibling word that supplies the type name, if any.
    /// `None` means the path is spelled out explicitly in the grammar.
    pub ordinal: Option<usize>,
}

/// A rule that loads, creates or deletes an entry in the type tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeLoadRule {
    pub operation: TypeOperation,
    pub load_type: TypeName,
}

/// One node of the grammar rule tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    Real,
    Integer,
    LineString,
    String(StringRule),
    QuotedString(QuotedStringRule),
    Literal(String),
    /// Opaque sub-grammar displayed by its best name.
    Delimited,
    Sequence(SequenceRule),
    Alternate(AlternateRule),
    Recurrence(RecurrenceRule),
    /// Reference to another rule; `None` when unresolved.
    RuleReference(Option<RuleId>),
    NamedRule(Option<RuleId>),
    Struct(Option<RuleId>),
    Value(Option<RuleId>),
    TypeLoad(TypeLoadRule),
    /// Extension point: whatever grammar the current type defines.
    TypeCommand,
    /// Rule kinds the engine does not interpret (script blocks, pushes).
    Opaque(String),
}

/// A rule plus the name of its best enclosing named context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub kind: RuleKind,
    pub(crate) context: Option<String>,
}

impl Rule {
    /// Name of the closest named rule this rule belongs to, `"rule"` if none.
    pub fn best_name(&self) -> &str {
        self.context.as_deref().unwrap_or("rule")
    }
}

/// Errors reported when a grammar refers to rules it does not contain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrammarError {
    #[error("rule {from} refers to missing rule {to}")]
    DanglingRule { from: usize, to: usize },
    #[error("grammar has no root rule")]
    MissingRoot,
}

/// Arena of grammar rules with a designated root.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: Vec<Rule>,
    root: Option<RuleId>,
}

impl Grammar {
    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.0)
    }

    pub fn kind(&self, id: RuleId) -> Option<&RuleKind> {
        self.rule(id).map(|rule| &rule.kind)
    }

    /// Root rule of the input language (the document-level block).
    pub fn root(&self) -> Option<RuleId> {
        self.root
    }

    /// Best display name for a rule, `"rule"` if it has no named context.
    pub fn best_name(&self, id: RuleId) -> &str {
        self.rule(id).map_or("rule", Rule::best_name)
    }

    /// End keyword of `id` if it is a recurrence.
    pub fn end_keyword(&self, id: RuleId) -> Option<&str> {
        match self.kind(id) {
            Some(RuleKind::Recurrence(rec)) => Some(rec.end_keyword.as_str()),
            _ => None,
        }
    }

    /// Check that every rule id reachable from the arena is in bounds.
    pub fn validate(&self) -> Result<(), GrammarError> {
        let root = self.root.ok_or(GrammarError::MissingRoot)?;
        if root.0 >= self.rules.len() {
            return Err(GrammarError::DanglingRule { from: root.0, to: root.0 });
        }
        for (from, rule) in self.rules.iter().enumerate() {
            for to in referenced_rules(&rule.kind) {
                if to.0 >= self.rules.len() {
                    return Err(GrammarError::DanglingRule { from, to: to.0 });
                }
            }
        }
        Ok(())
    }
}

fn referenced_rules(kind: &RuleKind) -> Vec<RuleId> {
    match kind {
        RuleKind::Sequence(seq) => seq.children.clone(),
        RuleKind::Alternate(alt) => alt.children.clone(),
        RuleKind::Recurrence(rec) => rec.subordinate.into_iter().collect(),
        RuleKind::RuleReference(target)
        | RuleKind::NamedRule(target)
        | RuleKind::Struct(target)
        | RuleKind::Value(target) => target.iter().copied().collect(),
        RuleKind::Real
        | RuleKind::Integer
        | RuleKind::LineString
        | RuleKind::String(_)
        | RuleKind::QuotedString(_)
        | RuleKind::Literal(_)
        | RuleKind::Delimited
        | RuleKind::TypeLoad(_)
        | RuleKind::TypeCommand
        | RuleKind::Opaque(_) => Vec::new(),
    }
}
