//! Shared grammars and helpers

use once_cell::sync::Lazy;
use tokenkit::engine::Engine;
use tokenkit::grammar::{Action, Grammar, Mode, Rule, rules};
use tokenkit::token::Token;
use tokenkit::token_type::{CODE_DELIMITER, CODE_IDENTIFIER, CODE_IDENTIFIER_TYPE};

/// Upper-case identifiers at the top level, lower-case types inside nested parentheses
pub static PARAMS: Lazy<Grammar> = Lazy::new(|| {
    Grammar::new("params").with_init(|| {
        vec![
            Mode::new(
                "root",
                vec![
                    rules::whitespace(),
                    rules::newline(),
                    Rule::pattern("[A-Z]+", Action::emit([CODE_IDENTIFIER]).then(Action::score(5))),
                    Rule::pattern(r"\(", Action::emit([CODE_DELIMITER]).then(Action::enter("param"))),
                ],
            ),
            Mode::new(
                "param",
                vec![
                    rules::whitespace(),
                    Rule::pattern("[a-z]+", Action::emit([CODE_IDENTIFIER_TYPE])),
                    Rule::pattern(r"\(", Action::emit([CODE_DELIMITER]).then(Action::enter("param"))),
                    Rule::pattern(r"\)", Action::emit([CODE_DELIMITER]).then(Action::exit())),
                ],
            ),
        ]
    })
});

/// Whitespace and identifiers of any case
pub static WORDS: Lazy<Grammar> = Lazy::new(|| {
    Grammar::new("words").with_init(|| vec![Mode::new("root", vec![rules::whitespace(), rules::ascii_identifier()])])
});

/// A grammar with a single mode made of `rules`
pub fn single_mode(name: &str, rules: impl Fn() -> Vec<Rule> + Send + Sync + 'static) -> Grammar {
    Grammar::new(name).with_init(move || vec![Mode::new("root", rules())])
}

/// Pull tokens until a stop token; returns the tokens before it and the stop token
pub fn drain<'a>(engine: &mut Engine<'a>) -> (Vec<Token<'a>>, Token<'a>) {
    let mut tokens = Vec::new();
    loop {
        let token = engine.next_token();
        if token.is_stop() {
            return (tokens, token);
        }
        tokens.push(token);
    }
}
