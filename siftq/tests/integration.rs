//! Integration tests for siftq CLI.

use std::process::{Command, Output};
use tempfile::TempDir;

fn siftq_cmd(config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_siftq"));
    // Keep the user's own config out of the way
    cmd.env("SIFT_CONFIG", config_dir.join("sift.toml"));
    cmd.env_remove("SIFT_LOG");
    cmd
}

fn run(config_dir: &std::path::Path, args: &[&str]) -> Output {
    siftq_cmd(config_dir)
        .args(args)
        .output()
        .expect("failed to run siftq")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(output.status.success(), "siftq failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_translate_numeric_json() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["translate", "age", "numeric", ">=18"]);
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({
            "sql": {
                "fragment": "age >= ?",
                "params": [{ "kind": "number", "value": "18" }]
            }
        })
    );
}

#[test]
fn test_translate_sql_format() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["translate", "-f", "sql", "deleted_at", "date", "--", "-null"]);
    assert!(output.status.success(), "siftq failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("deleted_at IS NOT NULL"));
    assert_eq!(lines.next(), Some("[]"));
}

#[test]
fn test_translate_object_document() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["translate", "profile", "object", "--", "-avatar", "bio"]);
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({
            "document": {
                "profile.avatar": { "$exists": false },
                "profile.bio": { "$exists": true }
            }
        })
    );
}

#[test]
fn test_translate_string_pattern() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["t", "name", "string", "*oh*"]);
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({ "document": { "name": { "$regex": "oh", "$options": "i" } } })
    );
}

#[test]
fn test_translate_without_values_is_noop() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["translate", "name", "string"]);
    assert_eq!(stdout_json(&output), serde_json::json!({ "document": {} }));
}

#[test]
fn test_intent_command() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["intent", "status", "string", "--", "-active"]);
    assert_eq!(
        stdout_json(&output),
        serde_json::json!([{
            "intent": "comparison",
            "field": "status",
            "operator": "ne",
            "operand": { "kind": "text", "value": "active" }
        }])
    );
}

#[test]
fn test_unknown_type_fails() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["translate", "x", "blob", "1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown declared type: blob"));
}

#[test]
fn test_sql_format_rejects_document_types() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["translate", "-f", "sql", "name", "string", "x"]);
    assert!(!output.status.success());
}

#[test]
fn test_lenient_dates_pass_through() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["translate", "at", "date", ">=soon"]);
    assert_eq!(
        stdout_json(&output)["sql"]["params"],
        serde_json::json!([{ "kind": "text", "value": "soon" }])
    );
}

#[test]
fn test_strict_timestamps_flag() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["--strict-timestamps", "translate", "at", "date", ">=soon"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unparseable timestamp"));
}

#[test]
fn test_config_file_alias() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("custom.toml");
    std::fs::write(&config_path, "table_alias = \"u\"\n").unwrap();

    let output = run(
        tmp.path(),
        &["--config", config_path.to_str().unwrap(), "translate", "age", "numeric", "<30"],
    );
    assert_eq!(stdout_json(&output)["sql"]["fragment"], "u.age < ?");
}

#[test]
fn test_config_from_env() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("sift.toml"), "timestamps = \"strict\"\n").unwrap();

    let output = run(tmp.path(), &["translate", "at", "date", "later"]);
    assert!(!output.status.success());
}
