//! Engine configuration
//!
//! Every field has a default, so a partial JSON document (or none at all)
//! yields a working configuration:
//!
//! ```json
//! { "include_paths": [".", "shared/includes"], "max_syntax_list_size": 80 }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kinds unioned when a nested reference asks for `platform_part`.
pub const DEFAULT_PLATFORM_PART_KINDS: [&str; 5] = ["movers", "comms", "processors", "weapons", "sensors"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Expansion cap (in words) for syntax hints.
    pub max_syntax_word_index: i32,
    /// Largest cartesian product `join_syntax` builds before collapsing.
    pub max_syntax_list_size: usize,
    /// Leading words that switch completion to include-path mode.
    pub include_commands: Vec<String>,
    /// Directories searched for include files, relative to `working_directory`.
    pub include_paths: Vec<PathBuf>,
    /// Base directory for include paths; the process directory when unset.
    pub working_directory: Option<PathBuf>,
    /// Directory entries never offered as include suggestions.
    pub ignored_include_entries: Vec<String>,
    /// Expand type-command rules into the current type's own grammar.
    pub expand_type_commands: bool,
    /// Member kinds covered by the `platform_part` pseudo-kind.
    pub platform_part_kinds: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_syntax_word_index: 20,
            max_syntax_list_size: 50,
            include_commands: vec!["include".to_string(), "include_once".to_string()],
            include_paths: vec![PathBuf::from(".")],
            working_directory: None,
            ignored_include_entries: vec![".".to_string(), "..".to_string(), "CVS".to_string()],
            expand_type_commands: true,
            platform_part_kinds: DEFAULT_PLATFORM_PART_KINDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// True if `word` starts an include command.
    pub fn is_include_command(&self, word: &str) -> bool {
        self.include_commands.iter().any(|c| c == word)
    }
}
