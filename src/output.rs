//! Output formatting for human and JSON modes
//!
//! Every report can be rendered either as human-readable text or as
//! machine-parseable JSON. Human text is built as a string first so it can be
//! tested, then printed.

use std::fmt::Write as _;

use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::registry::{GrammarInfo, Scored};
use crate::token::Token;
use crate::token_type::{self, TokenType};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// A token as reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRecord {
    /// Type name, empty for the typeless sentinel
    #[serde(rename = "type")]
    pub kind: String,
    /// Token text
    pub text: String,
}

impl From<&Token<'_>> for TokenRecord {
    fn from(token: &Token<'_>) -> Self {
        Self {
            kind: token.kind.map(TokenType::name).unwrap_or_default().to_string(),
            text: token.text.to_string(),
        }
    }
}

impl TokenRecord {
    fn render(&self, color: bool) -> String {
        let line = format!("[{}] {:?}", self.kind, self.text);
        match TokenType::by_name(&self.kind).and_then(color_of) {
            Some(c) if color => line.color(c).to_string(),
            _ => line,
        }
    }
}

fn color_of(kind: TokenType) -> Option<Color> {
    let palette = [
        (token_type::STOP_ERROR, Color::Red),
        (token_type::STOP, Color::BrightBlack),
        (token_type::TEXT_INVALID, Color::Red),
        (token_type::CODE_COMMENT, Color::Green),
        (token_type::CODE_STRING, Color::Yellow),
        (token_type::CODE_NUMBER, Color::Cyan),
        (token_type::CODE_IDENTIFIER_KEYWORD, Color::Magenta),
        (token_type::CODE_IDENTIFIER_LITERAL, Color::Magenta),
        (token_type::CODE_IDENTIFIER_FUNCTION, Color::Blue),
        (token_type::CODE_IDENTIFIER_NAMESPACE, Color::Blue),
        (token_type::CODE_OPERATOR, Color::BrightWhite),
    ];
    palette.iter().find(|(class, _)| kind.is_a(*class)).map(|&(_, c)| c)
}

/// Tokens of one scan, up to and including the stop token
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Grammar used
    pub grammar: String,
    /// Tokens before the stop token
    pub tokens: Vec<TokenRecord>,
    /// The stop token
    pub stop: TokenRecord,
    /// Final score
    pub score: i64,
    /// Text left unscanned
    pub remaining: String,
}

impl ScanReport {
    /// Pull tokens from `engine` until it halts
    #[must_use]
    pub fn collect(engine: &mut Engine<'_>) -> Self {
        let mut tokens = Vec::new();
        let stop = loop {
            let token = engine.next_token();
            if token.is_stop() {
                break TokenRecord::from(&token);
            }
            tokens.push(TokenRecord::from(&token));
        };
        Self {
            grammar: engine.grammar().name().to_string(),
            tokens,
            stop,
            score: engine.score(),
            remaining: engine.remaining_text().to_string(),
        }
    }

    /// True if the scan ended on a rule error
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.stop.kind == token_type::STOP_ERROR.name()
    }

    /// Render the report based on output mode
    pub fn render(&self, mode: OutputMode, color: bool) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human(color)),
            OutputMode::Json => render_json(self),
        }
    }

    /// Human-readable text: one token per line, then the stop token and summary
    ///
    /// Text left unscanned follows a separator line, written as is.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            let _ = writeln!(out, "{}", token.render(color));
        }
        let _ = writeln!(out, "{}", self.stop.render(color));
        let _ = writeln!(out, "\ngrammar: {}  score: {}  tokens: {}", self.grammar, self.score, self.tokens.len());
        if !self.remaining.is_empty() {
            out.push_str("--- remaining ---\n");
            out.push_str(&self.remaining);
        }
        out
    }
}

/// Score of one candidate grammar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateScore {
    /// Canonical grammar name
    pub grammar: String,
    /// Score once halted
    pub score: i64,
}

/// Outcome of auto-detection
#[derive(Debug, Clone, Serialize)]
pub struct DetectReport {
    /// Candidates that could be run, in the order tried
    pub candidates: Vec<CandidateScore>,
    /// Winning grammar
    pub selected: Option<String>,
}

impl DetectReport {
    /// Build from scored candidates and the winner
    #[must_use]
    pub fn new(scored: &[Scored<'_>], selected: Option<Scored<'_>>) -> Self {
        Self {
            candidates: scored
                .iter()
                .map(|s| CandidateScore {
                    grammar: s.info.name().to_string(),
                    score: s.score,
                })
                .collect(),
            selected: selected.map(|s| s.info.name().to_string()),
        }
    }

    /// Render the report based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => render_json(self),
        }
    }

    /// Human-readable text
    #[must_use]
    pub fn to_human(&self) -> String {
        let mut out = String::new();
        for candidate in &self.candidates {
            let marker = if self.selected.as_deref() == Some(candidate.grammar.as_str()) { "*" } else { " " };
            let _ = writeln!(out, "{marker} {:<12} {:>6}", candidate.grammar, candidate.score);
        }
        match &self.selected {
            Some(name) => {
                let _ = writeln!(out, "\nSelected: {name}");
            },
            None => out.push_str("\nNo grammar could be run.\n"),
        }
        out
    }
}

/// One registered grammar
#[derive(Debug, Clone, Serialize)]
pub struct GrammarSummary {
    /// Names, canonical first
    pub names: Vec<String>,
    /// MIME types
    pub mime_types: Vec<String>,
    /// File-name patterns
    pub file_names: Vec<String>,
    /// Mode names, empty if the grammar fails to initialize
    pub modes: Vec<String>,
    /// Initialization error, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&GrammarInfo> for GrammarSummary {
    fn from(info: &GrammarInfo) -> Self {
        let (modes, error) = match info.grammar().modes() {
            Ok(modes) => (modes.iter().map(|m| m.name().to_string()).collect(), None),
            Err(err) => (Vec::new(), Some(err.to_string())),
        };
        Self {
            names: info.names().to_vec(),
            mime_types: info.mime_types().to_vec(),
            file_names: info.file_names().to_vec(),
            modes,
            error,
        }
    }
}

/// Registered grammars
#[derive(Debug, Clone, Serialize)]
pub struct GrammarList {
    /// Grammars, in registration order
    pub grammars: Vec<GrammarSummary>,
}

impl GrammarList {
    /// Render the list based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => render_json(self),
        }
    }

    /// Human-readable text
    #[must_use]
    pub fn to_human(&self) -> String {
        let mut out = String::new();
        for grammar in &self.grammars {
            let _ = writeln!(out, "{}", grammar.names.join(", "));
            if !grammar.file_names.is_empty() {
                let _ = writeln!(out, "  files: {}", grammar.file_names.join(" "));
            }
            if !grammar.mime_types.is_empty() {
                let _ = writeln!(out, "  mime:  {}", grammar.mime_types.join(" "));
            }
            match &grammar.error {
                Some(err) => {
                    let _ = writeln!(out, "  error: {err}");
                },
                None => {
                    let _ = writeln!(out, "  modes: {}", grammar.modes.join(" "));
                },
            }
        }
        out
    }
}

/// A token type and its descendants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeNode {
    /// Full dotted name
    pub name: String,
    /// Sub-types, sorted by name
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TypeNode>,
}

impl TypeNode {
    /// The subtree rooted at `kind`
    #[must_use]
    pub fn new(kind: TokenType) -> Self {
        Self {
            name: kind.name().to_string(),
            children: kind.children().into_iter().map(Self::new).collect(),
        }
    }
}

/// The whole taxonomy
#[derive(Debug, Clone, Serialize)]
pub struct TypeTree {
    /// Class roots
    pub roots: Vec<TypeNode>,
}

impl TypeTree {
    /// Snapshot the registered types
    #[must_use]
    pub fn current() -> Self {
        Self {
            roots: TokenType::class_roots().into_iter().map(TypeNode::new).collect(),
        }
    }

    /// Render the tree based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.to_human()),
            OutputMode::Json => render_json(self),
        }
    }

    /// Indented tree, one type per line
    #[must_use]
    pub fn to_human(&self) -> String {
        fn walk(node: &TypeNode, depth: usize, out: &mut String) {
            let _ = writeln!(out, "{:indent$}{}", "", node.name, indent = depth * 2);
            for child in &node.children {
                walk(child, depth + 1, out);
            }
        }
        let mut out = String::new();
        for root in &self.roots {
            walk(root, 0, &mut out);
        }
        out
    }
}

fn render_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}
