//! Lookup services backing type and name reference completion
//!
//! The engine never walks the document itself. It asks a [`SymbolIndex`]
//! for the names the document defines and lets any registered
//! [`NameSuggestionProvider`] append names from outside the document
//! (model databases, team lists, ...).

use rustc_hash::FxHashMap;

use super::TypePath;

/// Read-only queries against the parsed document.
///
/// Implementations must be synchronous and side-effect free: one completion
/// request may call them many times.
pub trait SymbolIndex: Send + Sync {
    /// Names of user definitions whose type key starts with `path`.
    fn find_definitions_of_type(&self, path: &TypePath) -> Vec<String>;

    /// Names of built-in (and user) types registered under `kind`.
    fn base_types(&self, kind: &TypePath) -> Vec<String>;

    /// Declared names of `kind`, sorted and without duplicates.
    fn find_names(&self, kind: &str) -> Vec<String>;
}

/// Hook for extra name candidates not declared in the document.
pub trait NameSuggestionProvider: Send + Sync {
    fn suggest_names(&self, kind: &str, names: &mut Vec<String>);
}

/// In-memory [`SymbolIndex`] for callers that already hold their tables.
#[derive(Debug, Clone, Default)]
pub struct DefinitionIndex {
    definitions: Vec<(TypePath, String)>,
    base_types: FxHashMap<TypePath, Vec<String>>,
    names: FxHashMap<String, Vec<String>>,
}

impl DefinitionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a definition named `name` with the full type key `key`.
    pub fn add_definition(&mut self, key: TypePath, name: impl Into<String>) {
        self.definitions.push((key, name.into()));
    }

    pub fn add_base_type(&mut self, kind: TypePath, name: impl Into<String>) {
        self.base_types.entry(kind).or_default().push(name.into());
    }

    pub fn add_name(&mut self, kind: impl Into<String>, name: impl Into<String>) {
        self.names.entry(kind.into()).or_default().push(name.into());
    }
}

impl SymbolIndex for DefinitionIndex {
    fn find_definitions_of_type(&self, path: &TypePath) -> Vec<String> {
        self.definitions
            .iter()
            .filter(|(key, _)| key.len() >= path.len() && key[..path.len()] == path[..])
            .map(|(_, name)| name.clone())
            .collect()
    }

    fn base_types(&self, kind: &TypePath) -> Vec<String> {
        self.base_types.get(kind).cloned().unwrap_or_default()
    }

    fn find_names(&self, kind: &str) -> Vec<String> {
        let mut names = self.names.get(kind).cloned().unwrap_or_default();
        names.sort();
        names.dedup();
        names
    }
}
