//! Grammar definitions
//!
//! A [`Grammar`] is a named list of [`Mode`]s; a mode is an ordered list of
//! [`Rule`]s tried against the remaining input. The first mode is the entry point.
//!
//! Grammars are meant to be shared statics. Their modes are built, validated, and
//! their patterns compiled the first time an engine uses them; the outcome
//! (including a failure) is cached for every later user, across threads.
//!
//! # Examples
//!
//! ```
//! use once_cell::sync::Lazy;
//! use tokenkit::grammar::{Action, Grammar, Mode, Rule, rules};
//! use tokenkit::token_type::CODE_IDENTIFIER;
//!
//! static WORDS: Lazy<Grammar> = Lazy::new(|| {
//!     Grammar::new("words").with_init(|| {
//!         vec![Mode::new("root", vec![
//!             rules::whitespace(),
//!             Rule::pattern("[a-z]+", Action::emit([CODE_IDENTIFIER]).then(Action::score(1))),
//!         ])]
//!     })
//! });
//!
//! assert_eq!(WORDS.modes().unwrap().len(), 1);
//! ```

mod action;
mod rule;
pub mod rules;

use std::fmt;

use log::{debug, warn};
use once_cell::sync::OnceCell;
use thiserror::Error;

pub use action::{Action, ActionFn};
pub use rule::{FuncRule, PatternRule, Rule, RuleFn};

/// Errors in a grammar definition, reported when the grammar is first used
#[derive(Debug, Clone, Error)]
pub enum GrammarError {
    /// No initializer was attached to the grammar
    #[error("grammar '{0}' has no initializer")]
    MissingInit(String),

    /// The initializer produced no modes
    #[error("grammar '{0}' has no modes")]
    NoModes(String),

    /// A mode has no rules
    #[error("mode '{mode}' in grammar '{grammar}' has no rules")]
    EmptyMode {
        /// Grammar name
        grammar: String,
        /// Mode name
        mode: String,
    },

    /// Two modes share a name
    #[error("mode '{mode}' is defined twice in grammar '{grammar}'")]
    DuplicateMode {
        /// Grammar name
        grammar: String,
        /// Mode name
        mode: String,
    },

    /// A pattern rule does not compile
    #[error("{source} (grammar='{grammar}', mode='{mode}', rule={rule})")]
    InvalidPattern {
        /// Grammar name
        grammar: String,
        /// Mode name
        mode: String,
        /// Index of the rule in its mode
        rule: usize,
        /// Compilation error
        source: regex::Error,
    },
}

/// Errors raised by a rule while scanning
///
/// The engine turns them into a `Stop.Error` token naming the grammar, mode and
/// rule that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The number of token types does not fit the capture groups of the pattern
    #[error("invalid number of token types (expected {expected}, got {got})")]
    TypeCountMismatch {
        /// Types required by the pattern
        expected: usize,
        /// Types given to the action
        got: usize,
    },

    /// Two capture groups overlap or are not in left to right order
    #[error("overlapping regex groups")]
    OverlappingGroups,

    /// The target of an enter-mode action does not exist
    #[error("grammar '{grammar}' has no mode '{mode}'")]
    UnknownMode {
        /// Grammar name
        grammar: String,
        /// Requested mode
        mode: String,
    },

    /// Exit-mode was requested with nothing to return to
    #[error("pop empty mode stack")]
    EmptyModeStack,

    /// The rule pattern failed to compile
    #[error("invalid pattern: {0}")]
    Pattern(String),

    /// Rules kept firing without consuming input or producing tokens
    #[error("no progress after {0} rule passes")]
    NoProgress(usize),

    /// Failure reported by a custom rule
    #[error("{0}")]
    Custom(String),
}

impl RuleError {
    /// Create a custom rule error
    #[must_use]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// A named lexical context: an ordered list of rules
#[derive(Debug)]
pub struct Mode {
    name: String,
    rules: Vec<Rule>,
}

impl Mode {
    /// Create a mode
    #[must_use]
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Mode name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules, in the order they are tried
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

type InitFn = dyn Fn() -> Vec<Mode> + Send + Sync;

/// A named set of modes, initialized once at first use
pub struct Grammar {
    name: String,
    init: Option<Box<InitFn>>,
    modes: OnceCell<Result<Vec<Mode>, GrammarError>>,
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.modes.get() {
            None => "uninitialized".to_string(),
            Some(Ok(modes)) => format!("{} mode(s)", modes.len()),
            Some(Err(err)) => format!("failed: {err}"),
        };
        f.debug_struct("Grammar").field("name", &self.name).field("state", &state).finish()
    }
}

impl Grammar {
    /// Create a grammar without an initializer; see [`Grammar::with_init`]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            init: None,
            modes: OnceCell::new(),
        }
    }

    /// Set the function building the modes; it runs once, at first use
    #[must_use]
    pub fn with_init(mut self, init: impl Fn() -> Vec<Mode> + Send + Sync + 'static) -> Self {
        self.init = Some(Box::new(init));
        self
    }

    /// Grammar name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The initialized modes, building them on first call
    ///
    /// Concurrent first calls wait for a single initialization. A failure is cached
    /// and returned to every caller.
    pub fn modes(&self) -> Result<&[Mode], GrammarError> {
        self.modes
            .get_or_init(|| {
                let result = self.build();
                match &result {
                    Ok(modes) => debug!(
                        "grammar '{}' initialized: {} mode(s), {} rule(s)",
                        self.name,
                        modes.len(),
                        modes.iter().map(|m| m.rules.len()).sum::<usize>()
                    ),
                    Err(err) => warn!("grammar '{}' failed to initialize: {err}", self.name),
                }
                result
            })
            .as_ref()
            .map(Vec::as_slice)
            .map_err(Clone::clone)
    }

    /// Index of the mode called `name`
    pub(crate) fn mode_index(modes: &[Mode], name: &str) -> Option<usize> {
        modes.iter().position(|m| m.name == name)
    }

    fn build(&self) -> Result<Vec<Mode>, GrammarError> {
        let init = self.init.as_ref().ok_or_else(|| GrammarError::MissingInit(self.name.clone()))?;
        let modes = init();
        if modes.is_empty() {
            return Err(GrammarError::NoModes(self.name.clone()));
        }
        for (i, mode) in modes.iter().enumerate() {
            if modes[..i].iter().any(|m| m.name == mode.name) {
                return Err(GrammarError::DuplicateMode {
                    grammar: self.name.clone(),
                    mode: mode.name.clone(),
                });
            }
            if mode.rules.is_empty() {
                return Err(GrammarError::EmptyMode {
                    grammar: self.name.clone(),
                    mode: mode.name.clone(),
                });
            }
            for (index, rule) in mode.rules.iter().enumerate() {
                rule.compile().map_err(|source| GrammarError::InvalidPattern {
                    grammar: self.name.clone(),
                    mode: mode.name.clone(),
                    rule: index,
                    source,
                })?;
            }
        }
        Ok(modes)
    }
}
