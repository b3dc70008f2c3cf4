//! Rules: pattern driven or function driven

use std::fmt;

use once_cell::sync::OnceCell;
use regex::Regex;

use super::{Action, RuleError};
use crate::engine::Engine;

/// Signature of a function rule: returns whether it fired
pub type RuleFn = dyn Fn(&mut Engine<'_>) -> Result<bool, RuleError> + Send + Sync;

/// A condition and action attempted against the remaining input
#[derive(Debug)]
pub enum Rule {
    /// Anchored pattern with an action
    Pattern(PatternRule),
    /// Arbitrary logic run against the engine
    Func(FuncRule),
}

impl Rule {
    /// A rule matching `pattern` at the start of the remaining input
    #[must_use]
    pub fn pattern(pattern: impl Into<String>, action: Action) -> Self {
        Self::Pattern(PatternRule {
            source: pattern.into(),
            action,
            regex: OnceCell::new(),
        })
    }

    /// A rule running `f`, which reports whether it consumed input
    #[must_use]
    pub fn func(f: impl Fn(&mut Engine<'_>) -> Result<bool, RuleError> + Send + Sync + 'static) -> Self {
        Self::Func(FuncRule { f: Box::new(f) })
    }

    pub(crate) fn compile(&self) -> Result<(), regex::Error> {
        match self {
            Self::Pattern(rule) => rule.regex().map(|_| ()).map_err(Clone::clone),
            Self::Func(_) => Ok(()),
        }
    }

    pub(crate) fn exec(&self, engine: &mut Engine<'_>) -> Result<bool, RuleError> {
        match self {
            Self::Pattern(rule) => rule.exec(engine),
            Self::Func(rule) => (rule.f)(engine),
        }
    }
}

/// A rule triggered by a pattern anchored at the start of the remaining input
pub struct PatternRule {
    source: String,
    action: Action,
    regex: OnceCell<Result<Regex, regex::Error>>,
}

impl fmt::Debug for PatternRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternRule")
            .field("pattern", &self.source)
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

impl PatternRule {
    /// The pattern as written, before anchoring
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The action run on a match
    #[must_use]
    pub const fn action(&self) -> &Action {
        &self.action
    }

    fn regex(&self) -> Result<&Regex, &regex::Error> {
        self.regex
            .get_or_init(|| Regex::new(&format!(r"\A(?:{})", self.source)))
            .as_ref()
    }

    fn exec(&self, engine: &mut Engine<'_>) -> Result<bool, RuleError> {
        let regex = self.regex().map_err(|err| RuleError::Pattern(err.to_string()))?;
        let text = engine.remaining_text();
        match regex.captures(text) {
            Some(captures) => self.action.exec(engine, &captures),
            None => Ok(false),
        }
    }
}

/// A rule running custom logic against the engine
pub struct FuncRule {
    f: Box<RuleFn>,
}

impl fmt::Debug for FuncRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FuncRule(..)")
    }
}
