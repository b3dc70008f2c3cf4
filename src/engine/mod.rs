//! The tokenizing engine
//!
//! An [`Engine`] runs one [`Grammar`] over one input text and hands out tokens on
//! demand. Each request drains the output queue; when it is empty the rules of the
//! current mode are tried in order until one fires, then the next pass starts over
//! at the first rule of whatever mode is current.
//!
//! Scanning ends with a token of the `Stop` class, which is then returned on every
//! later request:
//!
//! - `Stop.EndOfString` once the input is exhausted
//! - `Stop.Lexer` on a stop marker (the marker is the token text) or when no rule
//!   matches (empty text)
//! - `Stop.Error` when a rule fails; the text names the grammar, mode and rule
//!
//! # Examples
//!
//! ```
//! use tokenkit::engine::Engine;
//! use tokenkit::grammars;
//! use tokenkit::token_type::{STOP_END_OF_STRING, TEXT_WHITESPACE};
//!
//! let mut engine = Engine::new(&grammars::C, "int x;").unwrap();
//! let mut kinds = Vec::new();
//! loop {
//!     let token = engine.next_token();
//!     if token.is_stop() {
//!         assert!(token.is_a(STOP_END_OF_STRING));
//!         break;
//!     }
//!     kinds.push(token.kind);
//! }
//! assert_eq!(kinds.len(), 4);
//! assert_eq!(kinds[1], Some(TEXT_WHITESPACE));
//! ```

mod queue;

use std::any::Any;
use std::fmt;

use log::{debug, trace};

pub use queue::TokenQueue;

use crate::cursor::Cursor;
use crate::grammar::{Grammar, GrammarError, Mode, RuleError};
use crate::token::Token;
use crate::token_type::{STOP_END_OF_STRING, STOP_ERROR, STOP_LEXER, TokenType};

/// Consecutive passes allowed to neither consume input nor queue a token
pub const MAX_IDLE_PASSES: usize = 64;

/// Tokenizer state for one input text
pub struct Engine<'a> {
    grammar: &'a Grammar,
    modes: &'a [Mode],
    stop_markers: Vec<String>,
    text: &'a str,
    queue: TokenQueue<Token<'a>>,
    mode: usize,
    mode_stack: Vec<usize>,
    rule_idx: usize,
    score: i64,
    stop: Option<Token<'a>>,
    extension: Option<Box<dyn Any + Send>>,
}

impl fmt::Debug for Engine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("grammar", &self.grammar.name())
            .field("mode", &self.mode_name())
            .field("depth", &self.mode_stack.len())
            .field("remaining", &self.text.len())
            .field("queued", &self.queue.len())
            .field("score", &self.score)
            .field("stop", &self.stop)
            .finish_non_exhaustive()
    }
}

impl<'a> Engine<'a> {
    /// Create an engine scanning `text` with `grammar`, starting in its first mode
    ///
    /// Initializes the grammar if this is its first use; a grammar that failed to
    /// initialize never yields an engine.
    pub fn new(grammar: &'a Grammar, text: &'a str) -> Result<Self, GrammarError> {
        let modes = grammar.modes()?;
        Ok(Self {
            grammar,
            modes,
            stop_markers: Vec::new(),
            text,
            queue: TokenQueue::new(),
            mode: 0,
            mode_stack: Vec::new(),
            rule_idx: 0,
            score: 0,
            stop: None,
            extension: None,
        })
    }

    /// Halt on any of `markers`, tried in order before the rules; empty markers are ignored
    #[must_use]
    pub fn with_stop_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_markers
            .extend(markers.into_iter().map(Into::into).filter(|m: &String| !m.is_empty()));
        self
    }

    /// Attach grammar specific data for function rules, see [`Engine::extension`]
    #[must_use]
    pub fn with_extension<T: Any + Send>(mut self, extension: T) -> Self {
        self.extension = Some(Box::new(extension));
        self
    }

    /// Produce the next token
    ///
    /// Once a `Stop` token has been returned, the same token is returned forever.
    pub fn next_token(&mut self) -> Token<'a> {
        if let Some(stop) = &self.stop {
            return stop.clone();
        }
        if self.queue.is_empty() {
            self.fill();
        }
        let token = self
            .queue
            .pop()
            .unwrap_or_else(|| Token::owned(STOP_ERROR, "empty output queue"));
        if token.is_stop() {
            debug!("grammar '{}' halted in mode '{}': {token}", self.grammar.name(), self.mode_name());
            self.stop = Some(token.clone());
        }
        token
    }

    /// Text not consumed yet
    #[must_use]
    pub const fn remaining_text(&self) -> &'a str {
        self.text
    }

    /// Accumulated score; meaningful once halted
    #[must_use]
    pub const fn score(&self) -> i64 {
        self.score
    }

    /// True once a `Stop` token has been returned
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.stop.is_some()
    }

    /// Grammar driving this engine
    #[must_use]
    pub const fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    /// Name of the current mode
    #[must_use]
    pub fn mode_name(&self) -> &'a str {
        let modes = self.modes;
        modes[self.mode].name()
    }

    /// Number of modes waiting on the mode stack
    #[must_use]
    pub fn mode_depth(&self) -> usize {
        self.mode_stack.len()
    }

    /// Extension data, if attached and of type `T`
    #[must_use]
    pub fn extension<T: Any>(&self) -> Option<&T> {
        self.extension.as_deref()?.downcast_ref()
    }

    /// Mutable extension data, if attached and of type `T`
    pub fn extension_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.extension.as_deref_mut()?.downcast_mut()
    }

    /// Queue a token
    pub fn push_token(&mut self, token: Token<'a>) {
        self.queue.push(token);
    }

    /// Remove up to `len` bytes from the front of the remaining text and return them
    ///
    /// # Panics
    ///
    /// Panics if `len` is inside a multi-byte character.
    pub fn consume(&mut self, len: usize) -> &'a str {
        let (head, tail) = self.text.split_at(len.min(self.text.len()));
        self.text = tail;
        head
    }

    /// Consume `len` bytes as one token of type `kind`
    pub fn emit(&mut self, kind: TokenType, len: usize) {
        let text = self.consume(len);
        self.queue.push(Token::new(kind, text));
    }

    /// Run a [`Cursor`] scanner over the remaining text and queue its token
    ///
    /// Returns false, leaving the input untouched, when the scanner finds nothing.
    pub fn scan<R>(&mut self, scanner: impl FnOnce(&mut Cursor<'a>) -> R) -> bool
    where
        R: Into<Option<Token<'a>>>,
    {
        let mut cursor = Cursor::new(self.text);
        match scanner(&mut cursor).into() {
            Some(token) if !token.is_empty() => {
                self.text = cursor.rest();
                self.queue.push(token);
                true
            },
            _ => false,
        }
    }

    /// Add `delta` to the score
    pub const fn add_score(&mut self, delta: i64) {
        self.score += delta;
    }

    /// Push the current mode and switch to `name`
    pub fn enter_mode(&mut self, name: &str) -> Result<(), RuleError> {
        let index = Grammar::mode_index(self.modes, name).ok_or_else(|| RuleError::UnknownMode {
            grammar: self.grammar.name().to_string(),
            mode: name.to_string(),
        })?;
        debug!("enter mode '{name}' from '{}'", self.mode_name());
        self.mode_stack.push(self.mode);
        self.mode = index;
        Ok(())
    }

    /// Return to the mode on top of the stack
    pub fn exit_mode(&mut self) -> Result<(), RuleError> {
        let previous = self.mode_stack.pop().ok_or(RuleError::EmptyModeStack)?;
        debug!("exit mode '{}' to '{}'", self.mode_name(), self.modes[previous].name());
        self.mode = previous;
        Ok(())
    }

    /// Run dispatch passes until something is queued
    fn fill(&mut self) {
        let mut idle = 0;
        while self.queue.is_empty() {
            let before = self.text.len();
            self.dispatch();
            if !self.queue.is_empty() || self.text.len() != before {
                idle = 0;
                continue;
            }
            idle += 1;
            if idle >= MAX_IDLE_PASSES {
                self.fail(&RuleError::NoProgress(idle), self.mode_name());
            }
        }
    }

    fn dispatch(&mut self) {
        if self.text.is_empty() {
            self.queue.push(Token::new(STOP_END_OF_STRING, ""));
            return;
        }

        let text = self.text;
        if let Some(marker) = self.stop_markers.iter().find(|m| text.starts_with(m.as_str())) {
            let len = marker.len();
            let marker = self.consume(len);
            self.queue.push(Token::new(STOP_LEXER, marker));
            return;
        }

        let modes = self.modes;
        let mode = &modes[self.mode];
        for (index, rule) in mode.rules().iter().enumerate() {
            self.rule_idx = index;
            match rule.exec(self) {
                Ok(true) => {
                    trace!("rule fired (grammar='{}', mode='{}', rule={index})", self.grammar.name(), mode.name());
                    return;
                },
                Ok(false) => {},
                Err(err) => {
                    self.fail(&err, mode.name());
                    return;
                },
            }
        }
        self.queue.push(Token::new(STOP_LEXER, ""));
    }

    fn fail(&mut self, err: &RuleError, mode: &str) {
        let message = format!(
            "{err} (grammar='{}', mode='{mode}', rule={})",
            self.grammar.name(),
            self.rule_idx
        );
        self.queue.push(Token::owned(STOP_ERROR, message));
    }
}
