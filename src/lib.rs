pub mod completion;
pub mod config;
pub mod grammar;
pub mod logging;
pub mod types;

pub use completion::{AutoComplete, AutocompleteResult, CompletionRequest, SyntaxResult};
pub use config::{ConfigError, EngineConfig};
pub use grammar::{Grammar, GrammarBuilder, GrammarError, RuleId};
pub use types::{DefinitionIndex, NameSuggestionProvider, SymbolIndex, TypeId, TypeTable, TypeTableError};
