//! Incremental construction of a [`Grammar`]
//!
//! Rules are pushed into the arena in any order. Recursive rules are tied
//! together with [`GrammarBuilder::forward`] and [`GrammarBuilder::define`]:
//!
//! ```rust,ignore
//! let mut b = GrammarBuilder::new();
//! let expr = b.forward();
//! let paren = b.sequence(vec![open, expr, close]);
//! let body = b.alternate(vec![number, paren]);
//! b.define(expr, body);
//! ```

use super::{
    AlternateRule, Grammar, GrammarError, QuotedStringRule, RecurrenceRule, Rule, RuleId,
    RuleKind, SequenceRule, StringFlags, StringRule, TypeLoadRule, TypeName, TypeOperation,
};
use crate::types::TypePath;

#[derive(Debug, Default)]
pub struct GrammarBuilder {
    rules: Vec<Rule>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a rule of any kind.
    pub fn push(&mut self, kind: RuleKind) -> RuleId {
        self.rules.push(Rule { kind, context: None });
        RuleId(self.rules.len() - 1)
    }

    pub fn literal(&mut self, text: impl Into<String>) -> RuleId {
        self.push(RuleKind::Literal(text.into()))
    }

    pub fn real(&mut self) -> RuleId {
        self.push(RuleKind::Real)
    }

    pub fn integer(&mut self) -> RuleId {
        self.push(RuleKind::Integer)
    }

    pub fn line_string(&mut self) -> RuleId {
        self.push(RuleKind::LineString)
    }

    /// Plain string leaf of the given node kind (empty for untyped).
    pub fn string(&mut self, node_type: impl Into<String>) -> RuleId {
        self.string_with(node_type, StringFlags::default())
    }

    pub fn string_with(&mut self, node_type: impl Into<String>, flags: StringFlags) -> RuleId {
        self.push(RuleKind::String(StringRule {
            node_type: node_type.into(),
            flags,
        }))
    }

    /// String leaf whose value is a type of `kind`, resolved lazily.
    pub fn type_reference(&mut self, kind: impl Into<String>) -> RuleId {
        self.string_with(
            kind,
            StringFlags {
                lazy_type_reference: true,
                ..StringFlags::default()
            },
        )
    }

    /// String leaf whose value is a declared name of `kind`.
    pub fn name_reference(&mut self, kind: impl Into<String>) -> RuleId {
        self.string_with(
            kind,
            StringFlags {
                named: true,
                ..StringFlags::default()
            },
        )
    }

    /// String leaf declaring the name of a new type of `kind`.
    pub fn type_name(&mut self, kind: impl Into<String>) -> RuleId {
        self.string_with(
            kind,
            StringFlags {
                lazy_type_name: true,
                ..StringFlags::default()
            },
        )
    }

    pub fn quoted_string(&mut self) -> RuleId {
        self.push(RuleKind::QuotedString(QuotedStringRule::default()))
    }

    pub fn file_path(&mut self, file_type: Option<&str>) -> RuleId {
        self.push(RuleKind::QuotedString(QuotedStringRule {
            file_reference: true,
            file_type: file_type.map(str::to_string),
        }))
    }

    /// Opaque sub-grammar displayed as `<name>`.
    pub fn delimited(&mut self, name: impl Into<String>) -> RuleId {
        let id = self.push(RuleKind::Delimited);
        self.set_context(id, name);
        id
    }

    pub fn sequence(&mut self, children: Vec<RuleId>) -> RuleId {
        self.push(RuleKind::Sequence(SequenceRule {
            children,
            ..SequenceRule::default()
        }))
    }

    /// Sequence rendered as a single `<name>` token in syntax hints.
    pub fn single_token_sequence(&mut self, name: impl Into<String>, children: Vec<RuleId>) -> RuleId {
        let id = self.push(RuleKind::Sequence(SequenceRule {
            children,
            single_token: true,
            error_incomplete: false,
        }));
        self.set_context(id, name);
        id
    }

    /// Sequence that only exists to report an incomplete command.
    pub fn error_sequence(&mut self, children: Vec<RuleId>) -> RuleId {
        self.push(RuleKind::Sequence(SequenceRule {
            children,
            single_token: false,
            error_incomplete: true,
        }))
    }

    pub fn alternate(&mut self, children: Vec<RuleId>) -> RuleId {
        self.push(RuleKind::Alternate(AlternateRule { children }))
    }

    pub fn recurrence(&mut self, subordinate: Option<RuleId>, end_keyword: impl Into<String>) -> RuleId {
        self.push(RuleKind::Recurrence(RecurrenceRule {
            subordinate,
            end_keyword: end_keyword.into(),
        }))
    }

    pub fn reference(&mut self, target: RuleId) -> RuleId {
        self.push(RuleKind::RuleReference(Some(target)))
    }

    /// Unresolved reference, to be tied with [`GrammarBuilder::define`].
    pub fn forward(&mut self) -> RuleId {
        self.push(RuleKind::RuleReference(None))
    }

    /// Resolve a forward reference. Ignored for any other rule kind.
    pub fn define(&mut self, forward: RuleId, target: RuleId) {
        if let Some(rule) = self.rules.get_mut(forward.0) {
            if let RuleKind::RuleReference(slot) = &mut rule.kind {
                *slot = Some(target);
            }
        }
    }

    /// Named wrapper; the definition inherits `name` as its best context.
    pub fn named(&mut self, name: impl Into<String>, definition: RuleId) -> RuleId {
        let name = name.into();
        self.inherit_context(definition, &name);
        let id = self.push(RuleKind::NamedRule(Some(definition)));
        self.set_context(id, name);
        id
    }

    pub fn struct_rule(&mut self, name: impl Into<String>, definition: RuleId) -> RuleId {
        let name = name.into();
        self.inherit_context(definition, &name);
        let id = self.push(RuleKind::Struct(Some(definition)));
        self.set_context(id, name);
        id
    }

    pub fn value_rule(&mut self, name: impl Into<String>, definition: RuleId) -> RuleId {
        let name = name.into();
        self.inherit_context(definition, &name);
        let id = self.push(RuleKind::Value(Some(definition)));
        self.set_context(id, name);
        id
    }

    /// Load rule taking its type name from the sibling word at `ordinal`.
    pub fn load_from_word(&mut self, kind_path: TypePath, ordinal: usize) -> RuleId {
        self.push(RuleKind::TypeLoad(TypeLoadRule {
            operation: TypeOperation::Load,
            load_type: TypeName {
                path: kind_path,
                nested_lookup: false,
                ordinal: Some(ordinal),
            },
        }))
    }

    /// Load rule for an explicit nested path, e.g. `(load (subtype template))`.
    pub fn load_nested(&mut self, path: TypePath) -> RuleId {
        self.push(RuleKind::TypeLoad(TypeLoadRule {
            operation: TypeOperation::Load,
            load_type: TypeName {
                path,
                nested_lookup: true,
                ordinal: None,
            },
        }))
    }

    pub fn type_load(&mut self, rule: TypeLoadRule) -> RuleId {
        self.push(RuleKind::TypeLoad(rule))
    }

    pub fn type_command(&mut self) -> RuleId {
        self.push(RuleKind::TypeCommand)
    }

    pub fn opaque(&mut self, label: impl Into<String>) -> RuleId {
        self.push(RuleKind::Opaque(label.into()))
    }

    /// Set the best context name of a rule explicitly.
    pub fn set_context(&mut self, id: RuleId, name: impl Into<String>) {
        if let Some(rule) = self.rules.get_mut(id.0) {
            rule.context = Some(name.into());
        }
    }

    fn inherit_context(&mut self, id: RuleId, name: &str) {
        if let Some(rule) = self.rules.get_mut(id.0) {
            if rule.context.is_none() {
                rule.context = Some(name.to_string());
            }
        }
    }

    pub fn finish(self, root: RuleId) -> Result<Grammar, GrammarError> {
        let grammar = Grammar {
            rules: self.rules,
            root: Some(root),
        };
        grammar.validate()?;
        Ok(grammar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_reference_ties_recursion() {
        let mut b = GrammarBuilder::new();
        let item = b.forward();
        let word = b.literal("x");
        let body = b.sequence(vec![word, item]);
        b.define(item, body);
        let grammar = b.finish(body).unwrap();
        assert_eq!(grammar.kind(item), Some(&RuleKind::RuleReference(Some(body))));
    }

    #[test]
    fn test_named_rule_sets_definition_context() {
        let mut b = GrammarBuilder::new();
        let lit = b.literal("speed");
        let seq = b.sequence(vec![lit]);
        let named = b.named("speed-command", seq);
        let grammar = b.finish(named).unwrap();
        assert_eq!(grammar.best_name(seq), "speed-command");
        assert_eq!(grammar.best_name(named), "speed-command");
        assert_eq!(grammar.best_name(lit), "rule");
    }
}
