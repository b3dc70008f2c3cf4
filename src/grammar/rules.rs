//! Predefined rules shared by grammars

use super::{Action, Rule};
use crate::cursor::Cursor;
use crate::token_type::{
    CODE_COMMENT, CODE_DELIMITER, CODE_IDENTIFIER, CODE_NUMBER_DECIMAL, CODE_NUMBER_HEXADECIMAL, CODE_NUMBER_INTEGER,
    CODE_NUMBER_OCTAL, CODE_OPERATOR, CODE_OPERATOR_ARITHMETIC, CODE_OPERATOR_ASSIGNMENT, CODE_OPERATOR_BINARY,
    CODE_OPERATOR_LOGICAL, CODE_PUNCTUATION, TEXT_NEWLINE, TEXT_WHITESPACE, TokenType,
};

/// Decimal literal: `1e5`, `1.`, `1.5`, `.5`, `.5e-3`, with an optional sign and suffix
const DECIMAL: &str = r"[+-]?(?:[1-9][0-9]*[eE][+-]?[0-9]+|(?:0|[1-9][0-9]*)\.[0-9]*(?:[eE][+-]?[0-9]+)?|\.[0-9]+(?:[eE][+-]?[0-9]+)?)[fFlL]?";

fn single(pattern: &str, kind: TokenType) -> Rule {
    Rule::pattern(pattern, Action::emit([kind]))
}

/// Spaces, tabs, form and vertical feeds
#[must_use]
pub fn whitespace() -> Rule {
    single(r"[ \t\f\v]+", TEXT_WHITESPACE)
}

/// Runs of `\n` and `\r`
#[must_use]
pub fn newline() -> Rule {
    single(r"[\n\r]+", TEXT_NEWLINE)
}

/// ASCII identifiers
#[must_use]
pub fn ascii_identifier() -> Rule {
    single("[a-zA-Z_][a-zA-Z0-9_]*", CODE_IDENTIFIER)
}

/// `=` and compound assignments
#[must_use]
pub fn assignment() -> Rule {
    single(r"\+=|-=|\*=|/=|%=|\|=|&=|\^=|=", CODE_OPERATOR_ASSIGNMENT)
}

/// `+ - * / %`
#[must_use]
pub fn arithmetic() -> Rule {
    single(r"[+\-*/%]", CODE_OPERATOR_ARITHMETIC)
}

/// `&& || !`
#[must_use]
pub fn logical() -> Rule {
    single(r"&&|\|\||!", CODE_OPERATOR_LOGICAL)
}

/// `| & ^ ~`
#[must_use]
pub fn binary() -> Rule {
    single(r"[|&^~]", CODE_OPERATOR_BINARY)
}

/// Any common operator, untyped beyond `Code.Operator`
#[must_use]
pub fn operators() -> Rule {
    single(r"<<=|>>=|\+\+|--|->|<<|>>|<=|>=|==|!=|&&|\|\||[-+*/%]=|[|&^]=|[<>!=+\-*/%|&^~?:]", CODE_OPERATOR)
}

/// `. , ;`
#[must_use]
pub fn punctuation() -> Rule {
    single("[.,;]", CODE_PUNCTUATION)
}

/// Brackets, braces and parentheses
#[must_use]
pub fn delimiter() -> Rule {
    single(r"[{}\[\]()]", CODE_DELIMITER)
}

/// `//` comment up to the end of the line; adds 1 to the score
#[must_use]
pub fn slash_slash_comment() -> Rule {
    Rule::pattern(r"//[^\n]*", Action::emit([CODE_COMMENT]).then(Action::score(1)))
}

/// `/* */` comment, possibly spanning lines; adds 1 to the score
#[must_use]
pub fn slash_star_comment() -> Rule {
    Rule::pattern(r"(?s)/\*.*?\*/", Action::emit([CODE_COMMENT]).then(Action::score(1)))
}

/// `0x1F`
#[must_use]
pub fn hexadecimal() -> Rule {
    single("0[xX][0-9a-fA-F]+", CODE_NUMBER_HEXADECIMAL)
}

/// `017`
#[must_use]
pub fn octal() -> Rule {
    single("0[0-7]+", CODE_NUMBER_OCTAL)
}

/// Signed integer with an optional `l` suffix
#[must_use]
pub fn integer() -> Rule {
    single("[-+]?(?:0|[1-9][0-9]*)[lL]?", CODE_NUMBER_INTEGER)
}

/// Decimal literal with optional fraction, exponent and suffix
#[must_use]
pub fn decimal() -> Rule {
    single(DECIMAL, CODE_NUMBER_DECIMAL)
}

/// Any number recognized by [`Cursor::pop_number`]
#[must_use]
pub fn number() -> Rule {
    Rule::func(|engine| Ok(engine.scan(Cursor::pop_number)))
}
