//! C family grammar
//!
//! Braces, parentheses and brackets each open a mode closed by the matching
//! delimiter, so unbalanced closers can be penalized. Comments, keywords and
//! preprocessor directives raise the score.

use once_cell::sync::Lazy;

use super::{starts_with, starts_with_whitespace};
use crate::cursor::Cursor;
use crate::engine::Engine;
use crate::grammar::{Action, Grammar, Mode, Rule, RuleError, rules};
use crate::token::Token;
use crate::token_type::{
    CODE_DELIMITER, CODE_IDENTIFIER, CODE_IDENTIFIER_FUNCTION, CODE_IDENTIFIER_KEYWORD, CODE_IDENTIFIER_LITERAL,
    CODE_STRING, TEXT_INVALID, TEXT_WHITESPACE,
};

/// The C grammar
pub static C: Lazy<Grammar> = Lazy::new(|| Grammar::new("c").with_init(modes));

const KEYWORDS: &[&str] = &[
    "auto", "bool", "break", "case", "char", "class", "const", "continue", "default", "delete", "do", "double",
    "else", "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "namespace", "new", "private",
    "protected", "public", "register", "return", "short", "signed", "sizeof", "static", "struct", "switch",
    "template", "this", "typedef", "typename", "union", "unsigned", "using", "virtual", "void", "volatile", "while",
];

const LITERALS: &[&str] = &["NULL", "false", "nullptr", "true"];

/// (mode, opener, closer)
const NESTING: [(&str, &str, &str); 3] = [("block", r"\{", r"\}"), ("paren", r"\(", r"\)"), ("index", r"\[", r"\]")];

fn modes() -> Vec<Mode> {
    let mut modes = vec![Mode::new("root", body(None))];
    for (name, _, closer) in NESTING {
        modes.push(Mode::new(name, body(Some(closer))));
    }
    modes
}

fn body(closer: Option<&str>) -> Vec<Rule> {
    let mut rules = Vec::new();
    if let Some(closer) = closer {
        rules.push(Rule::pattern(closer, Action::emit([CODE_DELIMITER]).then(Action::exit())));
    }
    rules.extend([
        Rule::func(|engine| Ok(starts_with_whitespace(engine) && engine.scan(Cursor::pop_whitespace))),
        rules::newline(),
        rules::slash_slash_comment(),
        rules::slash_star_comment(),
        Rule::pattern(
            r#"(#[ \t]*include)([ \t]*)(<[^>\n]*>|"[^"\n]*")"#,
            Action::emit([CODE_IDENTIFIER_KEYWORD, TEXT_WHITESPACE, CODE_STRING]).then(Action::score(2)),
        ),
        Rule::pattern(
            r"#[ \t]*(?:define|undef|ifdef|ifndef|if|elif|else|endif|pragma|error|warning|line)\b",
            Action::emit([CODE_IDENTIFIER_KEYWORD]).then(Action::score(2)),
        ),
        Rule::func(|engine| Ok(starts_with(engine, b'"') && engine.scan(Cursor::pop_double_quoted_string))),
        Rule::func(|engine| Ok(starts_with(engine, b'\'') && engine.scan(Cursor::pop_single_quoted_string))),
        Rule::func(identifier),
        Rule::func(number),
    ]);
    for (name, opener, _) in NESTING {
        rules.push(Rule::pattern(opener, Action::emit([CODE_DELIMITER]).then(Action::enter(name))));
    }
    rules.extend([
        Rule::pattern(r"[)\]}]", Action::emit([CODE_DELIMITER]).then(Action::score(-1))),
        rules::operators(),
        rules::punctuation(),
        Rule::pattern(r"(?s).", Action::emit([TEXT_INVALID]).then(Action::score(-1))),
    ]);
    rules
}

/// Identifiers, classified as keyword, literal, function call or plain identifier
fn identifier(engine: &mut Engine<'_>) -> Result<bool, RuleError> {
    let text = engine.remaining_text();
    if !text.starts_with(|c: char| c == '_' || c.is_ascii_alphabetic()) {
        return Ok(false);
    }
    let word = Cursor::new(text).pop_ascii_identifier().text;
    let len = word.len();
    let kind = if KEYWORDS.contains(&word.as_ref()) {
        engine.add_score(1);
        CODE_IDENTIFIER_KEYWORD
    } else if LITERALS.contains(&word.as_ref()) {
        CODE_IDENTIFIER_LITERAL
    } else if text[len..].trim_start_matches([' ', '\t']).starts_with('(') {
        CODE_IDENTIFIER_FUNCTION
    } else {
        CODE_IDENTIFIER
    };
    engine.emit(kind, len);
    Ok(true)
}

/// Unsigned numbers with their `u`, `l` and `f` suffixes; signs are left to the operators
fn number(engine: &mut Engine<'_>) -> Result<bool, RuleError> {
    let text = engine.remaining_text();
    let bytes = text.as_bytes();
    let leading = match bytes {
        [b'0'..=b'9', ..] => true,
        [b'.', next, ..] => next.is_ascii_digit(),
        _ => false,
    };
    if !leading {
        return Ok(false);
    }
    let Some(Token { kind: Some(kind), text: literal }) = Cursor::new(text).pop_number() else {
        return Ok(false);
    };
    let len = literal.len();
    let suffix = bytes[len..]
        .iter()
        .take_while(|&&c| matches!(c, b'f' | b'F' | b'l' | b'L' | b'u' | b'U'))
        .count();
    engine.emit(kind, len + suffix);
    Ok(true)
}
