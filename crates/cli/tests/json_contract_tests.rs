// Integration tests for the `matchkit` binary.
//
// --json stdout must be exactly one JSON value; the human summary and logs go
// to stderr. Exit codes follow src/exit_codes.rs.
//
// Run with: cargo test -p matchkit-cli --test json_contract_tests -- --nocapture

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn matchkit() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_matchkit"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd.env_remove("MATCHKIT_LOG");
    cmd
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Assert stdout is a single, parseable JSON value.
fn assert_single_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let trimmed = stdout.trim();
    assert!(!trimmed.is_empty(), "stdout should not be empty");
    serde_json::from_str(trimmed)
        .unwrap_or_else(|e| panic!("stdout must be valid JSON.\nParse error: {e}\nstdout:\n{trimmed}"))
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const EXPECTED: &str = r#"[
  {"text": "a", "page": 1},
  {"text": "b", "page": 2}
]"#;

// ===========================================================================
// matchkit run
// ===========================================================================

#[test]
fn run_json_reports_field_identity() {
    let dir = tempfile::tempdir().unwrap();
    let expected = write(dir.path(), "expected.json", EXPECTED);
    let actual = write(dir.path(), "actual.jsonl", "{\"text\": \"b\", \"page\": 2}\n{\"text\": \"a\", \"page\": 1}\n");

    let output = matchkit()
        .args(["run", expected.to_str().unwrap(), actual.to_str().unwrap()])
        .args(["--field", "text", "--compare", "page", "--json"])
        .output()
        .expect("matchkit run --json");

    assert!(output.status.success(), "exit: {:?}\nstderr: {}", output.status, stderr(&output));
    let val = assert_single_json(&output);
    assert_eq!(val["result"]["strategy"], "by_text");
    assert_eq!(val["result"]["matches"][0]["match_id"], "text=a");
    assert_eq!(val["result"]["matches"][0]["actual_index"], 1);
    assert_eq!(val["summary"]["paired"], 2);
    assert_eq!(val["comparison"]["passed"], true);
    assert!(stderr(&output).contains("by_text: 2 triple(s)"));
}

#[test]
fn run_failed_comparison_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let expected = write(dir.path(), "expected.json", EXPECTED);
    let actual = write(dir.path(), "actual.json", r#"[{"text": "a", "page": 1}, {"text": "b", "page": 5}]"#);

    let output = matchkit()
        .args(["run", expected.to_str().unwrap(), actual.to_str().unwrap()])
        .args(["-f", "text", "--compare", "page"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "no --json, stdout stays empty");
    let err = stderr(&output);
    assert!(err.contains("1/2 instance(s) of 'page' failed"), "{err}");
    assert!(err.contains("error: field comparison failed"), "{err}");
}

#[test]
fn run_with_config_and_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let expected = write(dir.path(), "expected.json", EXPECTED);
    let actual = write(dir.path(), "actual.csv", "text,page\nzzz,1\n");
    let config = write(
        dir.path(),
        "m.toml",
        "name = \"cli\"\nfields = [\"text\"]\n\n[thresholds]\nfuzzy = 0.5\n",
    );
    let out = dir.path().join("result.json");

    let output = matchkit()
        .args(["run", expected.to_str().unwrap(), actual.to_str().unwrap()])
        .args(["--config", config.to_str().unwrap(), "--output", out.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["meta"]["config_name"], "cli");
    assert_eq!(written["result"]["strategy"], "best_effort");
    assert_eq!(written["summary"]["missing"], 2);
    assert_eq!(written["summary"]["extra"], 1);
}

#[test]
fn run_unknown_extension_exits_4_with_hint() {
    let dir = tempfile::tempdir().unwrap();
    let expected = write(dir.path(), "expected.json", EXPECTED);
    let actual = write(dir.path(), "actual.txt", "{}");

    let output = matchkit()
        .args(["run", expected.to_str().unwrap(), actual.to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(4));
    let err = stderr(&output);
    assert!(err.contains("unsupported input format"), "{err}");
    assert!(err.contains("hint:"), "{err}");
}

#[test]
fn run_invalid_config_exits_3() {
    let dir = tempfile::tempdir().unwrap();
    let expected = write(dir.path(), "expected.json", EXPECTED);
    let config = write(dir.path(), "bad.toml", "[thresholds]\nfuzzy = 2.0\n");

    let output = matchkit()
        .args(["run", expected.to_str().unwrap(), expected.to_str().unwrap()])
        .args(["--config", config.to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
}

// ===========================================================================
// matchkit validate / similarity
// ===========================================================================

#[test]
fn validate_reports_config_shape() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "m.toml", "name = \"v\"\nfields = [\"text\", \"source\"]\n");

    let output = matchkit().args(["validate", config.to_str().unwrap()]).output().unwrap();

    assert!(output.status.success());
    assert!(stderr(&output).contains("valid: config 'v' with 2 match field(s)"));
}

#[test]
fn similarity_prints_ratio() {
    let output = matchkit().args(["similarity", "abcd", "bcde"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "0.7500");

    let output = matchkit().args(["similarity", "abcd", "bcde", "--json"]).output().unwrap();
    let val = assert_single_json(&output);
    assert_eq!(val["ratio"], 0.75);
}
