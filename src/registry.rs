//! Grammar registry and auto-detection
//!
//! Maps names, MIME types and file-name patterns to grammars, and picks the grammar
//! that best fits a text by running each candidate to a halt and comparing scores.
//!
//! # Examples
//!
//! ```
//! use tokenkit::registry::{self, GrammarRegistry};
//!
//! let registry = GrammarRegistry::builtin();
//! assert!(registry.by_name("c").is_some());
//!
//! let candidates = registry.all();
//! let best = registry::select_by_score("[core]\nname = x\n", &candidates, &[]).unwrap();
//! assert_eq!(best.info.name(), "ini");
//! ```

use std::collections::HashMap;
use std::path::{Path, is_separator};

use glob::Pattern;
use log::{debug, warn};
use thiserror::Error;

use crate::engine::Engine;
use crate::grammar::{Grammar, GrammarError};
use crate::grammars;

/// Errors raised while registering or looking up grammars
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The grammar info has no name
    #[error("grammar info has no names")]
    NoNames,

    /// A name is already taken
    #[error("grammar name '{0}' already registered")]
    DuplicateName(String),

    /// A file-name pattern does not parse
    #[error("grammar '{grammar}' has invalid file name pattern '{pattern}': {source}")]
    InvalidFileName {
        /// Canonical name of the grammar
        grammar: String,
        /// The offending pattern
        pattern: String,
        /// Parse error
        source: glob::PatternError,
    },

    /// No grammar has this name
    #[error("unknown grammar '{0}'")]
    UnknownGrammar(String),
}

/// Description of a grammar for lookup
#[derive(Debug, Clone)]
pub struct GrammarInfo {
    names: Vec<String>,
    mime_types: Vec<String>,
    file_names: Vec<String>,
    grammar: &'static Grammar,
}

impl GrammarInfo {
    /// Describe `grammar`, registered under its own name
    #[must_use]
    pub fn new(grammar: &'static Grammar) -> Self {
        Self {
            names: vec![grammar.name().to_string()],
            mime_types: Vec::new(),
            file_names: Vec::new(),
            grammar,
        }
    }

    /// Replace the names; the first one is canonical
    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the MIME types
    #[must_use]
    pub fn with_mime_types<I, S>(mut self, mime_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mime_types = mime_types.into_iter().map(Into::into).collect();
        self
    }

    /// Set the file-name glob patterns, e.g. `*.c`
    #[must_use]
    pub fn with_file_names<I, S>(mut self, file_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_names = file_names.into_iter().map(Into::into).collect();
        self
    }

    /// Canonical name, empty if the info has no names
    #[must_use]
    pub fn name(&self) -> &str {
        self.names.first().map_or("", String::as_str)
    }

    /// All names
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// MIME types
    #[must_use]
    pub fn mime_types(&self) -> &[String] {
        &self.mime_types
    }

    /// File-name patterns
    #[must_use]
    pub fn file_names(&self) -> &[String] {
        &self.file_names
    }

    /// The grammar
    #[must_use]
    pub const fn grammar(&self) -> &'static Grammar {
        self.grammar
    }
}

#[derive(Debug)]
struct Entry {
    info: GrammarInfo,
    patterns: Vec<Pattern>,
}

/// A set of grammars indexed for lookup
#[derive(Debug, Default)]
pub struct GrammarRegistry {
    entries: Vec<Entry>,
    by_name: HashMap<String, usize>,
}

impl GrammarRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in grammars
    ///
    /// # Panics
    ///
    /// Panics if a built-in grammar description is invalid.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for info in grammars::builtin() {
            registry.register(info).expect("built-in grammars are valid");
        }
        registry
    }

    /// Add a grammar
    ///
    /// Fails, leaving the registry unchanged, if the info has no names, one of its
    /// names is taken, or a file-name pattern is invalid.
    pub fn register(&mut self, info: GrammarInfo) -> Result<(), RegistryError> {
        if info.names.is_empty() {
            return Err(RegistryError::NoNames);
        }
        for (i, name) in info.names.iter().enumerate() {
            if self.by_name.contains_key(name) || info.names[..i].contains(name) {
                return Err(RegistryError::DuplicateName(name.clone()));
            }
        }
        let patterns = info
            .file_names
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| RegistryError::InvalidFileName {
                    grammar: info.name().to_string(),
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let index = self.entries.len();
        for name in &info.names {
            self.by_name.insert(name.clone(), index);
        }
        debug!("registered grammar '{}'", info.name());
        self.entries.push(Entry { info, patterns });
        Ok(())
    }

    /// Grammar registered under `name`
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&GrammarInfo> {
        self.by_name.get(name).map(|&index| &self.entries[index].info)
    }

    /// Grammars declaring `mime_type`, in registration order
    #[must_use]
    pub fn by_mime_type(&self, mime_type: &str) -> Vec<&GrammarInfo> {
        self.entries
            .iter()
            .filter(|entry| entry.info.mime_types.iter().any(|m| m == mime_type))
            .map(|entry| &entry.info)
            .collect()
    }

    /// Grammars whose file-name patterns match the last component of `path`
    ///
    /// A path ending in a separator names a directory and matches nothing.
    #[must_use]
    pub fn by_file_name(&self, path: impl AsRef<Path>) -> Vec<&GrammarInfo> {
        let path = path.as_ref();
        if path.to_string_lossy().ends_with(is_separator) {
            return Vec::new();
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            return Vec::new();
        };
        self.entries
            .iter()
            .filter(|entry| entry.patterns.iter().any(|p| p.matches(file_name)))
            .map(|entry| &entry.info)
            .collect()
    }

    /// Every grammar, in registration order
    #[must_use]
    pub fn all(&self) -> Vec<&GrammarInfo> {
        self.entries.iter().map(|entry| &entry.info).collect()
    }

    /// Resolve `names` to grammars, or every grammar when `names` is empty
    pub fn candidates<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&GrammarInfo>, RegistryError> {
        if names.is_empty() {
            return Ok(self.all());
        }
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.by_name(name)
                    .ok_or_else(|| RegistryError::UnknownGrammar(name.to_string()))
            })
            .collect()
    }
}

/// A grammar with the score it reached on some text
#[derive(Debug, Clone, Copy)]
pub struct Scored<'r> {
    /// The grammar
    pub info: &'r GrammarInfo,
    /// Score once halted
    pub score: i64,
}

/// Run `grammar` over `text` until it halts and return its score
pub fn score_text(grammar: &Grammar, text: &str, stop_markers: &[String]) -> Result<i64, GrammarError> {
    let mut engine = Engine::new(grammar, text)?.with_stop_markers(stop_markers.iter().cloned());
    while !engine.next_token().is_stop() {}
    Ok(engine.score())
}

/// Score every candidate over `text`, skipping grammars that fail to initialize
#[must_use]
pub fn score_all<'r>(text: &str, candidates: &[&'r GrammarInfo], stop_markers: &[String]) -> Vec<Scored<'r>> {
    candidates
        .iter()
        .filter_map(|&info| match score_text(info.grammar, text, stop_markers) {
            Ok(score) => {
                debug!("grammar '{}' scored {score}", info.name());
                Some(Scored { info, score })
            },
            Err(err) => {
                warn!("skipping grammar '{}': {err}", info.name());
                None
            },
        })
        .collect()
}

/// The candidate with the highest score over `text`, the earliest one on ties
///
/// `None` only when no candidate could be run.
#[must_use]
pub fn select_by_score<'r>(
    text: &str,
    candidates: &[&'r GrammarInfo],
    stop_markers: &[String],
) -> Option<Scored<'r>> {
    best_of(&score_all(text, candidates, stop_markers))
}

/// Highest score of already scored candidates, the earliest one on ties
#[must_use]
pub fn best_of<'r>(scored: &[Scored<'r>]) -> Option<Scored<'r>> {
    scored
        .iter()
        .copied()
        .fold(None, |best: Option<Scored<'r>>, candidate| match best {
            Some(best) if best.score >= candidate.score => Some(best),
            _ => Some(candidate),
        })
}
