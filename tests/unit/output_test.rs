//! Tests for report building and rendering

use tokenkit::engine::Engine;
use tokenkit::grammar::{Rule, RuleError};
use tokenkit::grammars;
use tokenkit::output::{DetectReport, GrammarList, GrammarSummary, OutputMode, ScanReport, TypeTree};
use tokenkit::registry::{self, GrammarRegistry};

use super::common::single_mode;

#[test]
fn test_scan_report_json_shape() {
    let mut engine = Engine::new(&grammars::INI, "[a]\nk = 1 ?> rest").unwrap().with_stop_markers(["?>"]);
    let report = ScanReport::collect(&mut engine);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["grammar"], "ini");
    assert_eq!(json["score"], 3);
    assert_eq!(json["tokens"][0]["type"], "Code.Delimiter");
    assert_eq!(json["tokens"][1]["text"], "a");
    assert_eq!(json["stop"]["type"], "Stop.Lexer");
    assert_eq!(json["stop"]["text"], "?>");
    assert_eq!(json["remaining"], " rest");
}

#[test]
fn test_scan_report_keeps_error() {
    let grammar = single_mode("failing", || vec![Rule::func(|_| Err(RuleError::custom("bad input")))]);
    let mut engine = Engine::new(&grammar, "x").unwrap();
    let report = ScanReport::collect(&mut engine);
    assert!(report.is_error());
    assert!(report.tokens.is_empty());
    assert_eq!(report.stop.text, "bad input (grammar='failing', mode='root', rule=0)");

    let text = report.to_human(false);
    assert!(text.contains("[Stop.Error]"));
    assert!(text.ends_with("\n--- remaining ---\nx"));
}

#[test]
fn test_human_scan_escapes_text() {
    let mut engine = Engine::new(&grammars::C, "a\n\"q\"").unwrap();
    let text = ScanReport::collect(&mut engine).to_human(false);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "[Code.Identifier] \"a\"");
    assert_eq!(lines[1], "[Text.NewLine] \"\\n\"");
    assert_eq!(lines[2], "[Code.String.Double] \"\\\"q\\\"\"");
    assert_eq!(lines[3], "[Stop.EndOfString] \"\"");
}

#[test]
fn test_human_scan_writes_remaining_text_verbatim() {
    let mut engine = Engine::new(&grammars::C, "a ?>\n\t\"b\"\n").unwrap().with_stop_markers(["?>"]);
    let text = ScanReport::collect(&mut engine).to_human(false);
    assert!(text.ends_with("grammar: c  score: 0  tokens: 2\n--- remaining ---\n\n\t\"b\"\n"));
}

#[test]
fn test_detect_report_from_scores() {
    let registry = GrammarRegistry::builtin();
    let candidates = registry.all();
    let scored = registry::score_all("[core]\nname = x\n", &candidates, &[]);
    let best = registry::best_of(&scored);
    let report = DetectReport::new(&scored, best);

    assert_eq!(report.selected.as_deref(), Some("ini"));
    assert_eq!(report.candidates.len(), 2);
    assert_eq!(report.candidates[1].grammar, "ini");
    assert_eq!(report.candidates[1].score, 3);

    let text = report.to_human();
    assert!(text.contains("* ini"));
    assert!(text.ends_with("Selected: ini\n"));
}

#[test]
fn test_detect_report_without_candidates() {
    let report = DetectReport::new(&[], None);
    assert!(report.to_human().contains("No grammar could be run."));
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["selected"].is_null());
}

#[test]
fn test_grammar_list() {
    let registry = GrammarRegistry::builtin();
    let list = GrammarList {
        grammars: registry.all().into_iter().map(GrammarSummary::from).collect(),
    };
    assert_eq!(list.grammars[0].modes, ["root", "block", "paren", "index"]);
    assert_eq!(list.grammars[1].modes, ["root", "value"]);
    assert!(list.grammars.iter().all(|g| g.error.is_none()));

    let text = list.to_human();
    assert!(text.starts_with("c, cpp, c++\n"));
    assert!(text.contains("  files: *.ini *.cfg *.inf .editorconfig .gitconfig\n"));

    let json = serde_json::to_value(&list).unwrap();
    assert!(json["grammars"][0].get("error").is_none());
}

#[test]
fn test_type_tree_covers_every_class() {
    let tree = TypeTree::current();
    let roots: Vec<&str> = tree.roots.iter().map(|node| node.name.as_str()).collect();
    for root in ["Code", "Stop", "Text"] {
        assert!(roots.contains(&root), "missing {root}");
    }
    let stop = tree.roots.iter().find(|node| node.name == "Stop").unwrap();
    let children: Vec<&str> = stop.children.iter().map(|node| node.name.as_str()).collect();
    assert_eq!(children, ["Stop.EndOfString", "Stop.Error", "Stop.Lexer"]);

    let json = serde_json::to_value(&tree).unwrap();
    assert!(json["roots"].is_array());
}

#[test]
fn test_output_mode_names() {
    assert_eq!(serde_json::to_value(OutputMode::Json).unwrap(), "json");
    assert_eq!(serde_json::from_str::<OutputMode>("\"human\"").unwrap(), OutputMode::Human);
}
