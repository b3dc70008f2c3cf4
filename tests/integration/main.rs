//! Integration tests for the tokenkit CLI
//!
//! Each test runs the built binary against files in a temporary directory, with
//! the user configuration directory pointed at an empty location.

use assert_cmd::cargo;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper function to create a tokenkit command with an isolated environment
fn tokenkit(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("tokenkit"));
    cmd.env("XDG_CONFIG_HOME", home).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// Helper to write a file into the temporary directory
fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn json_of(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout is JSON")
}

// =============================================================================
// VERSION AND HELP
// =============================================================================

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    tokenkit(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("tokenkit v"));
}

#[test]
fn test_version_json() {
    let dir = TempDir::new().unwrap();
    let output = tokenkit(dir.path()).args(["--json", "version"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(json_of(&output.stdout)["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_no_command_prints_hint() {
    let dir = TempDir::new().unwrap();
    tokenkit(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("tokenkit --help"));
}

// =============================================================================
// SCAN
// =============================================================================

#[test]
fn test_scan_picks_grammar_from_file_name() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "main.c", "int x = 1;\n");
    tokenkit(dir.path())
        .arg("scan")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("[Code.Identifier.Keyword] \"int\""))
        .stdout(predicate::str::contains("[Stop.EndOfString] \"\""))
        .stdout(predicate::str::contains("grammar: c  score: 1"));
}

#[test]
fn test_scan_json() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "settings.ini", "[core]\nname = x\n");
    let output = tokenkit(dir.path()).args(["--json", "scan"]).arg(&file).output().unwrap();
    assert!(output.status.success());

    let json = json_of(&output.stdout);
    assert_eq!(json["grammar"], "ini");
    assert_eq!(json["score"], 3);
    assert_eq!(json["tokens"][1]["type"], "Code.Identifier.Namespace");
    assert_eq!(json["tokens"][1]["text"], "core");
    assert_eq!(json["stop"]["type"], "Stop.EndOfString");
}

#[test]
fn test_scan_detects_grammar_from_stdin() {
    let dir = TempDir::new().unwrap();
    tokenkit(dir.path())
        .arg("scan")
        .write_stdin("; comment\n[core]\nname = x\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("grammar: ini"));
}

#[test]
fn test_scan_named_grammar_overrides_file_name() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "odd.c", "[core]\n");
    let output = tokenkit(dir.path()).args(["--json", "scan", "-g", "dosini"]).arg(&file).output().unwrap();
    assert!(output.status.success());
    assert_eq!(json_of(&output.stdout)["grammar"], "ini");
}

#[test]
fn test_scan_unknown_grammar_fails() {
    let dir = TempDir::new().unwrap();
    tokenkit(dir.path())
        .args(["scan", "-g", "cobol", "-"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown grammar 'cobol'"));
}

#[test]
fn test_scan_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    tokenkit(dir.path())
        .args(["scan", "absent.c"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read absent.c"));
}

#[test]
fn test_scan_stop_marker() {
    let dir = TempDir::new().unwrap();
    let output = tokenkit(dir.path())
        .args(["--json", "scan", "-g", "c", "--stop", "?>"])
        .write_stdin("a ?> b")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = json_of(&output.stdout);
    assert_eq!(json["stop"]["type"], "Stop.Lexer");
    assert_eq!(json["stop"]["text"], "?>");
    assert_eq!(json["remaining"], " b");
}

// =============================================================================
// DETECT
// =============================================================================

#[test]
fn test_detect_all_grammars() {
    let dir = TempDir::new().unwrap();
    tokenkit(dir.path())
        .arg("detect")
        .write_stdin("#include <stdio.h>\nint main(void) { return 0; }\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("* c"))
        .stdout(predicate::str::contains("Selected: c"));
}

#[test]
fn test_detect_restricted_candidates() {
    let dir = TempDir::new().unwrap();
    let output = tokenkit(dir.path())
        .args(["--json", "detect", "--candidate", "ini"])
        .write_stdin("int x;")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = json_of(&output.stdout);
    assert_eq!(json["candidates"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["selected"], "ini");
}

#[test]
fn test_detect_unknown_candidate_fails() {
    let dir = TempDir::new().unwrap();
    tokenkit(dir.path())
        .args(["detect", "-c", "c,nope"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown grammar 'nope'"));
}

// =============================================================================
// LISTINGS
// =============================================================================

#[test]
fn test_grammars() {
    let dir = TempDir::new().unwrap();
    tokenkit(dir.path())
        .arg("grammars")
        .assert()
        .success()
        .stdout(predicate::str::contains("c, cpp, c++"))
        .stdout(predicate::str::contains("ini, cfg, dosini"))
        .stdout(predicate::str::contains("modes: root value"));
}

#[test]
fn test_types() {
    let dir = TempDir::new().unwrap();
    tokenkit(dir.path())
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stop\n  Stop.EndOfString\n"))
        .stdout(predicate::str::contains("    Code.Number.Hexadecimal\n"));
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn test_config_file_sets_defaults() {
    let dir = TempDir::new().unwrap();
    let config = write(
        &dir,
        "tokenkit.toml",
        "[scan]\nstop_markers = [\"__END__\"]\n\n[output]\nformat = \"json\"\n",
    );
    let output = tokenkit(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["scan", "-g", "ini"])
        .write_stdin("[a]\n__END__\n[b]\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = json_of(&output.stdout);
    assert_eq!(json["stop"]["text"], "__END__");
    assert_eq!(json["score"], 2);
}

#[test]
fn test_config_in_user_config_dir() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("tokenkit")).unwrap();
    write(&dir, "tokenkit/config.toml", "[detect]\ncandidates = [\"c\"]\n");
    tokenkit(dir.path())
        .arg("detect")
        .write_stdin("[core]\nname = x\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected: c"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "bad.toml", "[output]\nformat = 3\n");
    tokenkit(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("grammars")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}
