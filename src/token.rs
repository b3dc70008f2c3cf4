//! Tokens produced by the engine

use std::borrow::Cow;
use std::fmt;

use crate::token_type::{self, TokenType};

/// A typed slice of the input text
///
/// The text borrows from the input handed to the engine. Only the diagnostic of a
/// `Stop.Error` token is owned, since it is not part of the input.
///
/// The default token has no type; it is a sentinel and never produced by an engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token<'a> {
    /// Type of the token, `None` only for the sentinel default
    pub kind: Option<TokenType>,
    /// Text of the token
    pub text: Cow<'a, str>,
}

impl<'a> Token<'a> {
    /// Create a token borrowing its text from the input
    #[must_use]
    pub const fn new(kind: TokenType, text: &'a str) -> Self {
        Self {
            kind: Some(kind),
            text: Cow::Borrowed(text),
        }
    }

    /// Create a token owning its text
    #[must_use]
    pub fn owned(kind: TokenType, text: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            text: Cow::Owned(text.into()),
        }
    }

    /// True if the token text is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True for the typeless sentinel
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        self.kind.is_none()
    }

    /// True if the token type is `other` or a descendant of it
    #[must_use]
    pub fn is_a(&self, other: TokenType) -> bool {
        self.kind.is_some_and(|kind| kind.is_a(other))
    }

    /// Like [`Token::is_a`] but with an optional type
    ///
    /// A typeless token is only a typeless type, and a typed token is never typeless.
    #[must_use]
    pub fn is_a_kind(&self, other: Option<TokenType>) -> bool {
        match (self.kind, other) {
            (None, None) => true,
            (Some(kind), Some(other)) => kind.is_a(other),
            _ => false,
        }
    }

    /// True for tokens of the `Stop` class
    #[must_use]
    pub fn is_stop(&self) -> bool {
        self.is_a(token_type::STOP)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "[{}] {:?}", kind, self.text),
            None => write!(f, "[<nil>] {:?}", self.text),
        }
    }
}
