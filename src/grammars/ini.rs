//! INI grammar: sections, comments and `key = value` lines

use once_cell::sync::Lazy;

use super::{starts_with, starts_with_whitespace};
use crate::cursor::Cursor;
use crate::grammar::{Action, Grammar, Mode, Rule, rules};
use crate::token_type::{
    CODE_COMMENT, CODE_DELIMITER, CODE_IDENTIFIER_LITERAL, CODE_IDENTIFIER_NAMESPACE, CODE_IDENTIFIER_VARIABLE,
    CODE_NUMBER_DECIMAL, CODE_NUMBER_INTEGER, CODE_OPERATOR_ASSIGNMENT, CODE_STRING, TEXT_INVALID, TEXT_NEWLINE,
    TEXT_WHITESPACE,
};

/// The INI grammar
pub static INI: Lazy<Grammar> = Lazy::new(|| {
    Grammar::new("ini").with_init(|| {
        vec![
            Mode::new(
                "root",
                vec![
                    Rule::func(|engine| Ok(starts_with_whitespace(engine) && engine.scan(Cursor::pop_whitespace))),
                    rules::newline(),
                    Rule::pattern(r"[;#][^\n]*", Action::emit([CODE_COMMENT]).then(Action::score(1))),
                    Rule::pattern(
                        r"(\[)([^\]\n]*)(\])",
                        Action::emit([CODE_DELIMITER, CODE_IDENTIFIER_NAMESPACE, CODE_DELIMITER]).then(Action::score(2)),
                    ),
                    Rule::pattern(
                        r"([A-Za-z0-9_.\-]+)([ \t]*)([=:])",
                        Action::emit([CODE_IDENTIFIER_VARIABLE, TEXT_WHITESPACE, CODE_OPERATOR_ASSIGNMENT])
                            .then(Action::score(1))
                            .then(Action::enter("value")),
                    ),
                    Rule::pattern(r"[^\r\n]", Action::emit([TEXT_INVALID]).then(Action::score(-1))),
                ],
            ),
            Mode::new(
                "value",
                vec![
                    Rule::pattern(r"[ \t]+", Action::emit([TEXT_WHITESPACE])),
                    Rule::pattern(r"[\n\r]+", Action::emit([TEXT_NEWLINE]).then(Action::exit())),
                    Rule::pattern(r"[;#][^\n]*", Action::emit([CODE_COMMENT])),
                    Rule::func(|engine| Ok(starts_with(engine, b'"') && engine.scan(Cursor::pop_double_quoted_string))),
                    Rule::pattern(r"(?i:true|false|yes|no|on|off)\b", Action::emit([CODE_IDENTIFIER_LITERAL])),
                    Rule::pattern(r"[-+]?[0-9]+\.[0-9]+\b", Action::emit([CODE_NUMBER_DECIMAL])),
                    Rule::pattern(r"[-+]?[0-9]+\b", Action::emit([CODE_NUMBER_INTEGER])),
                    Rule::pattern(r"[^\r\n;#]+", Action::emit([CODE_STRING])),
                ],
            ),
        ]
    })
});
