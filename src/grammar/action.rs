//! Actions run by pattern rules on a match

use std::fmt;

use regex::Captures;

use super::RuleError;
use crate::engine::Engine;
use crate::token_type::{self, TokenType};

/// Signature of a custom action: returns whether the rule fired
pub type ActionFn = dyn Fn(&mut Engine<'_>, &Captures<'_>) -> Result<bool, RuleError> + Send + Sync;

/// What a pattern rule does with its match
///
/// Actions compose: [`Action::then`] chains them into a sequence which stops at the
/// first error and reports the result of its last step.
pub enum Action {
    /// Split the match into tokens by capture group
    ///
    /// Without groups the whole match gets the single type. With N groups, N types
    /// are required; text outside the groups becomes plain `Text` tokens and empty
    /// groups are skipped.
    Emit(Vec<TokenType>),
    /// Add to the running score
    Score(i64),
    /// Push the current mode and switch to the named one
    Enter(String),
    /// Return to the previously pushed mode
    Exit,
    /// Run actions in order
    Sequence(Vec<Action>),
    /// Arbitrary logic over the match
    Custom(Box<ActionFn>),
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Emit(kinds) => f.debug_tuple("Emit").field(kinds).finish(),
            Self::Score(delta) => f.debug_tuple("Score").field(delta).finish(),
            Self::Enter(mode) => f.debug_tuple("Enter").field(mode).finish(),
            Self::Exit => f.write_str("Exit"),
            Self::Sequence(actions) => f.debug_tuple("Sequence").field(actions).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Action {
    /// Emit the match split by groups, see [`Action::Emit`]
    #[must_use]
    pub fn emit(kinds: impl Into<Vec<TokenType>>) -> Self {
        Self::Emit(kinds.into())
    }

    /// Add `delta` to the score
    #[must_use]
    pub const fn score(delta: i64) -> Self {
        Self::Score(delta)
    }

    /// Enter `mode`
    #[must_use]
    pub fn enter(mode: impl Into<String>) -> Self {
        Self::Enter(mode.into())
    }

    /// Leave the current mode
    #[must_use]
    pub const fn exit() -> Self {
        Self::Exit
    }

    /// A custom action
    #[must_use]
    pub fn custom(
        f: impl Fn(&mut Engine<'_>, &Captures<'_>) -> Result<bool, RuleError> + Send + Sync + 'static,
    ) -> Self {
        Self::Custom(Box::new(f))
    }

    /// Run `next` after this action
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        match self {
            Self::Sequence(mut actions) => {
                actions.push(next);
                Self::Sequence(actions)
            },
            first => Self::Sequence(vec![first, next]),
        }
    }

    pub(crate) fn exec(&self, engine: &mut Engine<'_>, captures: &Captures<'_>) -> Result<bool, RuleError> {
        match self {
            Self::Emit(kinds) => emit_groups(engine, kinds, captures),
            Self::Score(delta) => {
                engine.add_score(*delta);
                Ok(true)
            },
            Self::Enter(mode) => engine.enter_mode(mode).map(|()| true),
            Self::Exit => engine.exit_mode().map(|()| true),
            Self::Sequence(actions) => {
                let mut fired = false;
                for action in actions {
                    fired = action.exec(engine, captures)?;
                }
                Ok(fired)
            },
            Self::Custom(f) => f(engine, captures),
        }
    }
}

fn emit_groups(engine: &mut Engine<'_>, kinds: &[TokenType], captures: &Captures<'_>) -> Result<bool, RuleError> {
    let end = captures.get(0).map_or(0, |m| m.end());
    let groups = captures.len() - 1;

    if groups == 0 {
        if kinds.len() != 1 {
            return Err(RuleError::TypeCountMismatch {
                expected: 1,
                got: kinds.len(),
            });
        }
        if end == 0 {
            return Ok(false);
        }
        engine.emit(kinds[0], end);
        return Ok(true);
    }

    if kinds.len() != groups {
        return Err(RuleError::TypeCountMismatch {
            expected: groups,
            got: kinds.len(),
        });
    }

    // Validate every span before queuing anything
    let mut spans = Vec::with_capacity(groups);
    let mut prev_end = 0;
    for (index, &kind) in kinds.iter().enumerate() {
        let Some(group) = captures.get(index + 1) else {
            continue;
        };
        if group.is_empty() {
            continue;
        }
        if group.start() < prev_end {
            return Err(RuleError::OverlappingGroups);
        }
        prev_end = group.end();
        spans.push((group.start(), group.end(), kind));
    }
    if end == 0 {
        return Ok(false);
    }

    let mut offset = 0;
    for (start, stop, kind) in spans {
        if start > offset {
            engine.emit(token_type::TEXT, start - offset);
        }
        engine.emit(kind, stop - start);
        offset = stop;
    }
    if end > offset {
        engine.emit(token_type::TEXT, end - offset);
    }
    Ok(true)
}
