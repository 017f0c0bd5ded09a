//! Runs the `aeoscope` binary against temporary pages.

mod common;

use assert_cmd::Command;
use common::GUIDE_HTML;
use std::fs;
use tempfile::TempDir;

fn aeoscope(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_aeoscope"));
    cmd.current_dir(dir.path())
        .env_remove("AEOSCOPE_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn page(dir: &TempDir) -> String {
    let path = dir.path().join("guide.html");
    fs::write(&path, GUIDE_HTML).unwrap();
    path.display().to_string()
}

#[test]
fn test_technical_json_goes_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = page(&dir);

    let output = aeoscope(&dir)
        .args(["--format", "json", "technical", &input, "--url", "example.com/rust-guide"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["tool"], "Technical AEO Audit");
    assert_eq!(json["url"], "https://example.com/rust-guide");
    assert_eq!(json["crawlability"]["hasHTTPS"], true);
    assert!(json["overallScore"].as_u64().unwrap() <= 100);
}

#[test]
fn test_query_match_rejects_blank_queries() {
    let dir = TempDir::new().unwrap();
    let input = page(&dir);

    let output = aeoscope(&dir)
        .args(["query-match", &input, "--query", "   "])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("At least one valid query is required"));
}

#[test]
fn test_audit_writes_markdown_report_file() {
    let dir = TempDir::new().unwrap();
    let input = page(&dir);
    let report = dir.path().join("reports/audit.md");

    aeoscope(&dir)
        .args(["audit", &input, "-q", "what is rust", "--no-parallel", "--format", "markdown"])
        .arg("--output")
        .arg(&report)
        .assert()
        .success();

    let text = fs::read_to_string(&report).unwrap();
    assert!(text.starts_with("# Full AEO Audit Report"));
    assert!(text.contains("| queryMatch |"));
}

#[test]
fn test_audit_accepts_document_snapshot() {
    let dir = TempDir::new().unwrap();
    let snapshot = dir.path().join("page.json");
    fs::write(
        &snapshot,
        r#"{"url": "https://example.com/snap", "title": "Snapshot page", "blocks": [{"text": "Rust is fast."}]}"#,
    )
    .unwrap();

    let output = aeoscope(&dir)
        .args(["-f", "json", "audit"])
        .arg(&snapshot)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["tool"], "Full AEO Audit");
    assert_eq!(json["url"], "https://example.com/snap");
    assert!(json["queryMatch"].is_null());
}

#[test]
fn test_missing_page_fails() {
    let dir = TempDir::new().unwrap();

    aeoscope(&dir)
        .args(["content", "does-not-exist.html"])
        .assert()
        .failure();
}

#[test]
fn test_init_creates_config_once() {
    let dir = TempDir::new().unwrap();

    aeoscope(&dir).arg("init").assert().success();
    let config = fs::read_to_string(dir.path().join(".aeoscope.toml")).unwrap();
    assert!(config.contains("[aggregation]"));

    aeoscope(&dir).arg("init").assert().failure();
    aeoscope(&dir).args(["init", "--force"]).assert().success();
}
