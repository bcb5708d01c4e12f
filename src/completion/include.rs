//! File-system completion for include commands
//!
//! The argument typed so far is split into a directory part (up to the
//! last `/` or `\`) and a file-name prefix. Each configured include path is
//! scanned one level deep at `working_directory / include_path / directory`.

use std::path::PathBuf;

use tracing::debug;
use walkdir::WalkDir;

use super::ranking::rank_suggestions;
use crate::config::EngineConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeSuggestions {
    pub suggestions: Vec<String>,
    /// Set when a directory was offered; the user will keep typing after it.
    pub is_partial_token: bool,
}

/// Split `text` into a `/`-normalized directory part and a file-name prefix.
fn split_path(text: &str) -> (String, &str) {
    match text.rfind(['/', '\\']) {
        Some(pos) => (text[..=pos].replace('\\', "/"), &text[pos + 1..]),
        None => (String::new(), text),
    }
}

/// Include-path suggestions for the partially typed `text`.
pub fn include_suggestions(config: &EngineConfig, text: &str) -> IncludeSuggestions {
    let Some(working_directory) = config
        .working_directory
        .clone()
        .or_else(|| std::env::current_dir().ok())
    else {
        return IncludeSuggestions::default();
    };
    let (directory, prefix) = split_path(text);

    let mut result = IncludeSuggestions::default();
    for include_path in &config.include_paths {
        let search_dir: PathBuf = working_directory.join(include_path).join(&directory);
        if !search_dir.is_dir() {
            continue;
        }
        debug!(dir = ?search_dir, prefix, "scanning include directory");

        for entry in WalkDir::new(&search_dir).min_depth(1).max_depth(1) {
            let Ok(entry) = entry else {
                continue;
            };
            let name = entry.file_name().to_string_lossy();
            if !name.starts_with(prefix) {
                continue;
            }
            let mut suggestion = format!("{directory}{name}");
            if entry.path().is_dir() {
                if config.ignored_include_entries.iter().any(|ignored| *ignored == name) {
                    continue;
                }
                suggestion.push('/');
                result.is_partial_token = true;
            }
            result.suggestions.push(suggestion);
        }
    }
    result.suggestions = rank_suggestions(result.suggestions);
    result
}
