//! Tests for grammar construction and the predefined rules

use tokenkit::engine::Engine;
use tokenkit::grammar::{Action, Grammar, GrammarError, Mode, Rule, rules};
use tokenkit::token_type::{
    self, CODE_COMMENT, CODE_DELIMITER, CODE_IDENTIFIER, CODE_NUMBER_DECIMAL, CODE_NUMBER_HEXADECIMAL,
    CODE_NUMBER_INTEGER, CODE_NUMBER_OCTAL, CODE_OPERATOR, CODE_OPERATOR_ARITHMETIC, CODE_OPERATOR_ASSIGNMENT,
    CODE_OPERATOR_BINARY, CODE_OPERATOR_LOGICAL, CODE_PUNCTUATION, TEXT_NEWLINE, TEXT_WHITESPACE, TokenType,
};

use super::common::{drain, single_mode};

/// Kinds and texts of every token before the stop, plus the score
fn scan(grammar: &Grammar, text: &str) -> (Vec<(TokenType, String)>, i64) {
    let mut engine = Engine::new(grammar, text).unwrap();
    let (tokens, stop) = drain(&mut engine);
    assert!(stop.is_a(token_type::STOP_END_OF_STRING), "stopped early: {stop}");
    let tokens = tokens
        .iter()
        .map(|t| (t.kind.unwrap(), t.text.to_string()))
        .collect();
    (tokens, engine.score())
}

fn pair(kind: TokenType, text: &str) -> (TokenType, String) {
    (kind, text.to_string())
}

// =============================================================================
// Definition errors
// =============================================================================

#[test]
fn test_invalid_pattern_is_located() {
    let grammar = Grammar::new("broken").with_init(|| {
        vec![
            Mode::new("root", vec![rules::whitespace()]),
            Mode::new("inner", vec![rules::newline(), Rule::pattern("[z-a]", Action::emit([CODE_IDENTIFIER]))]),
        ]
    });
    let err = grammar.modes().unwrap_err();
    assert!(matches!(err, GrammarError::InvalidPattern { rule: 1, .. }));
    assert!(err.to_string().ends_with("(grammar='broken', mode='inner', rule=1)"));
}

#[test]
fn test_missing_init_message() {
    let grammar = Grammar::new("bare");
    assert_eq!(grammar.modes().unwrap_err().to_string(), "grammar 'bare' has no initializer");
}

#[test]
fn test_modes_keep_definition_order() {
    let grammar = Grammar::new("g").with_init(|| {
        vec![
            Mode::new("root", vec![rules::whitespace()]),
            Mode::new("string", vec![rules::newline()]),
            Mode::new("comment", vec![rules::newline(), rules::whitespace()]),
        ]
    });
    let modes = grammar.modes().unwrap();
    let names: Vec<&str> = modes.iter().map(Mode::name).collect();
    assert_eq!(names, ["root", "string", "comment"]);
    assert_eq!(modes[2].rules().len(), 2);
}

#[test]
fn test_pattern_rule_exposes_source() {
    let rule = Rule::pattern("[a-z]+", Action::emit([CODE_IDENTIFIER]));
    match rule {
        Rule::Pattern(pattern) => {
            assert_eq!(pattern.source(), "[a-z]+");
            assert!(matches!(pattern.action(), Action::Emit(kinds) if kinds == &[CODE_IDENTIFIER]));
        },
        Rule::Func(_) => panic!("expected a pattern rule"),
    }
}

// =============================================================================
// Predefined rules
// =============================================================================

#[test]
fn test_operator_families() {
    let grammar = single_mode("ops", || {
        vec![
            rules::whitespace(),
            rules::assignment(),
            rules::logical(),
            rules::arithmetic(),
            rules::binary(),
            rules::punctuation(),
            rules::delimiter(),
        ]
    });
    let (tokens, score) = scan(&grammar, "+= && - | ; (");
    let kinds: Vec<TokenType> = tokens.iter().map(|(k, _)| *k).filter(|k| *k != TEXT_WHITESPACE).collect();
    assert_eq!(
        kinds,
        [
            CODE_OPERATOR_ASSIGNMENT,
            CODE_OPERATOR_LOGICAL,
            CODE_OPERATOR_ARITHMETIC,
            CODE_OPERATOR_BINARY,
            CODE_PUNCTUATION,
            CODE_DELIMITER,
        ]
    );
    assert_eq!(score, 0);
}

#[test]
fn test_operators_prefer_longest_form() {
    let grammar = single_mode("ops", || vec![rules::whitespace(), rules::operators()]);
    let (tokens, _) = scan(&grammar, "<<= -> != ?");
    assert_eq!(
        tokens,
        [
            pair(CODE_OPERATOR, "<<="),
            pair(TEXT_WHITESPACE, " "),
            pair(CODE_OPERATOR, "->"),
            pair(TEXT_WHITESPACE, " "),
            pair(CODE_OPERATOR, "!="),
            pair(TEXT_WHITESPACE, " "),
            pair(CODE_OPERATOR, "?"),
        ]
    );
}

#[test]
fn test_number_patterns() {
    let grammar = single_mode("numbers", || {
        vec![
            rules::whitespace(),
            rules::hexadecimal(),
            rules::octal(),
            rules::decimal(),
            rules::integer(),
        ]
    });
    let (tokens, _) = scan(&grammar, "0x1F 017 1.5e3 42 .5");
    assert_eq!(
        tokens,
        [
            pair(CODE_NUMBER_HEXADECIMAL, "0x1F"),
            pair(TEXT_WHITESPACE, " "),
            pair(CODE_NUMBER_OCTAL, "017"),
            pair(TEXT_WHITESPACE, " "),
            pair(CODE_NUMBER_DECIMAL, "1.5e3"),
            pair(TEXT_WHITESPACE, " "),
            pair(CODE_NUMBER_INTEGER, "42"),
            pair(TEXT_WHITESPACE, " "),
            pair(CODE_NUMBER_DECIMAL, ".5"),
        ]
    );
}

#[test]
fn test_number_scanner_rule() {
    let grammar = single_mode("numbers", || vec![rules::whitespace(), rules::number()]);
    let (tokens, _) = scan(&grammar, "-7 0.e-1 0x10");
    assert_eq!(
        tokens,
        [
            pair(CODE_NUMBER_INTEGER, "-7"),
            pair(TEXT_WHITESPACE, " "),
            pair(CODE_NUMBER_DECIMAL, "0.e-1"),
            pair(TEXT_WHITESPACE, " "),
            pair(CODE_NUMBER_HEXADECIMAL, "0x10"),
        ]
    );
}

#[test]
fn test_comments_raise_score() {
    let grammar = single_mode("comments", || {
        vec![rules::newline(), rules::slash_slash_comment(), rules::slash_star_comment()]
    });
    let (tokens, score) = scan(&grammar, "// a\n/* b\n */");
    assert_eq!(
        tokens,
        [pair(CODE_COMMENT, "// a"), pair(TEXT_NEWLINE, "\n"), pair(CODE_COMMENT, "/* b\n */")]
    );
    assert_eq!(score, 2);
}

#[test]
fn test_patterns_only_match_at_the_front() {
    let grammar = single_mode("g", || vec![Rule::pattern("b", Action::emit([CODE_IDENTIFIER]))]);
    let mut engine = Engine::new(&grammar, "ab").unwrap();
    let (tokens, stop) = drain(&mut engine);
    assert!(tokens.is_empty());
    assert!(stop.is_a(token_type::STOP_LEXER));
    assert_eq!(stop.text, "");
    assert_eq!(engine.remaining_text(), "ab");
}
