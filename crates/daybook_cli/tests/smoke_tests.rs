//! CLI smoke tests — verify basic binary behavior.

use std::process::Command;

fn cli_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_daybook"))
}

#[test]
fn test_help_flag() {
    let output = cli_bin().arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Usage"),
        "Expected usage info in --help output"
    );
    assert!(stdout.contains("write"));
    assert!(stdout.contains("stats"));
}

#[test]
fn test_version_flag() {
    let output = cli_bin().arg("--version").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("daybook"),
        "Expected binary name in --version output"
    );
}

#[test]
fn test_invalid_config_does_not_panic() {
    // A nonexistent config file falls back to defaults
    let output = cli_bin()
        .arg("--config")
        .arg("/tmp/nonexistent_daybook_config_12345.toml")
        .arg("--help") // exit immediately via --help
        .output()
        .expect("failed to run");
    assert!(output.status.success());
}

#[test]
fn test_write_then_list_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("journal.db").display().to_string();

    // No Ollama server in CI; the write degrades to the rule classifier.
    let output = cli_bin()
        .args(["--db", &db, "write", "worried and stressed out"])
        .env("DAYBOOK_OLLAMA_URL", "http://127.0.0.1:9/api/generate")
        .env("DAYBOOK_OLLAMA_TIMEOUT", "1")
        .output()
        .expect("failed to run write");
    assert!(output.status.success(), "write failed: {:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Saved entry 1"));
    assert!(stdout.contains("anxious"));

    let output = cli_bin()
        .args(["--db", &db, "list"])
        .output()
        .expect("failed to run list");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("anxious"));
    assert!(stdout.contains("worried and stressed out"));
}

#[test]
fn test_show_missing_entry_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("journal.db").display().to_string();

    let output = cli_bin()
        .args(["--db", &db, "show", "42"])
        .output()
        .expect("failed to run show");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"));
}
