//! Property tests: scanning never loses or invents text

use proptest::prelude::*;
use tokenkit::cursor::Cursor;
use tokenkit::engine::Engine;
use tokenkit::grammar::Grammar;
use tokenkit::grammars;
use tokenkit::token_type::STOP_ERROR;

use super::common::{PARAMS, drain};

/// Tokens joined back together, followed by the unscanned rest
fn rebuild(grammar: &Grammar, text: &str, markers: &[&str]) -> String {
    let mut engine = Engine::new(grammar, text).unwrap().with_stop_markers(markers.iter().copied());
    let (tokens, stop) = drain(&mut engine);
    let mut out: String = tokens.iter().map(|t| &*t.text).collect();
    if !stop.is_a(STOP_ERROR) {
        out.push_str(&stop.text);
    }
    out.push_str(engine.remaining_text());
    out
}

proptest! {
    #[test]
    fn c_tokens_cover_the_input(text in "\\PC{0,64}") {
        prop_assert_eq!(rebuild(&grammars::C, &text, &[]), text);
    }

    #[test]
    fn ini_tokens_cover_the_input(text in "[\\[\\]a-z0-9=:;#\"\\. \t\r\n]{0,64}") {
        prop_assert_eq!(rebuild(&grammars::INI, &text, &[]), text);
    }

    #[test]
    fn stop_marker_keeps_the_rest(text in "[a-z (){};]{0,32}", tail in "[a-z ]{0,16}") {
        let input = format!("{text}@@{tail}");
        prop_assert_eq!(rebuild(&grammars::C, &input, &["@@"]), input);
    }

    #[test]
    fn nested_modes_cover_the_input(text in "[A-Za-z() ]{0,48}") {
        prop_assert_eq!(rebuild(&PARAMS, &text, &[]), text);
    }

    #[test]
    fn stop_is_latched(text in "\\PC{0,32}") {
        let mut engine = Engine::new(&grammars::C, &text).unwrap();
        let (_, stop) = drain(&mut engine);
        prop_assert!(!stop.is_a(STOP_ERROR));
        prop_assert_eq!(engine.next_token(), stop.clone());
        prop_assert_eq!(engine.next_token(), stop);
    }

    #[test]
    fn number_prefix_and_rest_rebuild_input(text in "[-+.0-9xXeEa-f]{0,12}") {
        let mut cursor = Cursor::new(&text);
        match cursor.pop_number() {
            Some(token) => {
                prop_assert!(!token.text.is_empty());
                prop_assert_eq!(format!("{}{}", token.text, cursor.rest()), text.clone());
            },
            None => prop_assert_eq!(cursor.rest(), text.as_str()),
        }
    }
}
