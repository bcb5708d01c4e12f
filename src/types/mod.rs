//! Type scopes consulted while completing type and name references
//!
//! A [`TypeTable`] is an arena of [`ParseType`]s. Each type has an optional
//! base type, a symbol table keyed by name, and optionally its own
//! extension rule (used by type-command grammar rules). Symbol tables are
//! nested: a platform type declares a `sensors` entry whose own symbol
//! table lists the individual sensors.
//!
//! ```text
//! WSF_PLATFORM (basic)
//!   └─ sensors ─┬─ RADAR_1
//!               └─ EO_1
//! my_fighter (user, base = WSF_PLATFORM)
//! ```
//!
//! Two root containers exist in every table: basic (built-in) types and
//! user-defined types.

pub mod index;

pub use index::{DefinitionIndex, NameSuggestionProvider, SymbolIndex};

use std::collections::BTreeMap;

use thiserror::Error;

use crate::grammar::RuleId;

/// Path of type names, outermost first (e.g. `["platform_type", "WSF_PLATFORM"]`).
pub type TypePath = Vec<String>;

/// Build a [`TypePath`] from string segments.
pub fn type_path<S: AsRef<str>>(segments: &[S]) -> TypePath {
    segments.iter().map(|s| s.as_ref().to_string()).collect()
}

/// Handle to a type stored in a [`TypeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub(crate) usize);

#[derive(Debug, Clone, Default)]
pub struct ParseType {
    pub name: String,
    pub base: Option<TypeId>,
    pub symbols: BTreeMap<String, TypeId>,
    /// Grammar the type contributes to commands inside its block.
    pub rule: Option<RuleId>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeTableError {
    #[error("type {owner} refers to missing type {missing}")]
    DanglingType { owner: usize, missing: usize },
}

#[derive(Debug, Clone)]
pub struct TypeTable {
    types: Vec<ParseType>,
    basic_root: TypeId,
    user_root: TypeId,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeTable {
    pub fn new() -> Self {
        let types = vec![
            ParseType {
                name: "basic".to_string(),
                ..ParseType::default()
            },
            ParseType {
                name: "user".to_string(),
                ..ParseType::default()
            },
        ];
        Self {
            types,
            basic_root: TypeId(0),
            user_root: TypeId(1),
        }
    }

    pub fn basic_root(&self) -> TypeId {
        self.basic_root
    }

    pub fn user_root(&self) -> TypeId {
        self.user_root
    }

    pub fn get(&self, id: TypeId) -> Option<&ParseType> {
        self.types.get(id.0)
    }

    pub fn name(&self, id: TypeId) -> Option<&str> {
        self.get(id).map(|t| t.name.as_str())
    }

    /// Add a detached type. Attach it with [`TypeTable::add_symbol`].
    pub fn add_type(&mut self, name: impl Into<String>, base: Option<TypeId>) -> TypeId {
        self.types.push(ParseType {
            name: name.into(),
            base,
            ..ParseType::default()
        });
        TypeId(self.types.len() - 1)
    }

    pub fn add_symbol(&mut self, owner: TypeId, key: impl Into<String>, symbol: TypeId) {
        if let Some(t) = self.types.get_mut(owner.0) {
            t.symbols.insert(key.into(), symbol);
        }
    }

    pub fn set_rule(&mut self, id: TypeId, rule: RuleId) {
        if let Some(t) = self.types.get_mut(id.0) {
            t.rule = Some(rule);
        }
    }

    /// Declare `name` under the `kind` table of `owner`, creating the
    /// kind container on first use.
    pub fn declare(&mut self, owner: TypeId, kind: &str, name: &str, base: Option<TypeId>) -> TypeId {
        let existing = self.get(owner).and_then(|t| t.symbols.get(kind).copied());
        let container = match existing {
            Some(container) => container,
            None => {
                let container = self.add_type(kind, None);
                self.add_symbol(owner, kind, container);
                container
            }
        };
        let declared = self.add_type(name, base);
        self.add_symbol(container, name, declared);
        declared
    }

    /// The type itself followed by its chain of base types.
    pub fn ancestry(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(type_id) = current {
            if chain.contains(&type_id) || self.get(type_id).is_none() {
                break;
            }
            chain.push(type_id);
            current = self.get(type_id).and_then(|t| t.base);
        }
        chain
    }

    /// Symbol `key` declared by `id` or any of its base types.
    pub fn find_symbol(&self, id: TypeId, key: &str) -> Option<TypeId> {
        self.ancestry(id)
            .into_iter()
            .find_map(|t| self.get(t).and_then(|ty| ty.symbols.get(key).copied()))
    }

    /// Follow `path` through nested symbol tables starting at `id`.
    pub fn find_nested_symbol(&self, id: TypeId, path: &[String]) -> Option<TypeId> {
        if path.is_empty() {
            return None;
        }
        path.iter()
            .try_fold(id, |current, segment| self.find_symbol(current, segment))
    }

    /// Names in the `kind` table declared directly by `id` (not its bases).
    pub fn symbol_names(&self, id: TypeId, kind: &str) -> Vec<&str> {
        self.get(id)
            .and_then(|t| t.symbols.get(kind))
            .and_then(|container| self.get(*container))
            .map(|container| container.symbols.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Extension rule of `id`, if it defines one.
    pub fn rule(&self, id: TypeId) -> Option<RuleId> {
        self.get(id).and_then(|t| t.rule)
    }

    /// Resolve an outermost-first stack of scope keys to the innermost type.
    ///
    /// The first key is looked up among user types, then basic types; each
    /// following key is looked up inside the previously resolved type.
    /// Resolution stops at the first key that cannot be found and the last
    /// resolved type is returned.
    pub fn resolve_scope_chain(&self, chain: &[TypePath]) -> Option<TypeId> {
        let mut resolved = None;
        for key in chain {
            let found = match resolved {
                Some(current) => self.find_nested_symbol(current, key),
                None => self
                    .find_nested_symbol(self.user_root, key)
                    .or_else(|| self.find_nested_symbol(self.basic_root, key)),
            };
            match found {
                Some(found) => resolved = Some(found),
                None => break,
            }
        }
        resolved
    }

    pub fn validate(&self) -> Result<(), TypeTableError> {
        for (owner, t) in self.types.iter().enumerate() {
            let referenced = t.base.into_iter().chain(t.symbols.values().copied());
            for missing in referenced {
                if missing.0 >= self.types.len() {
                    return Err(TypeTableError::DanglingType {
                        owner,
                        missing: missing.0,
                    });
                }
            }
        }
        Ok(())
    }
}
