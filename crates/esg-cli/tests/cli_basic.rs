//! Basic CLI E2E tests.
//!
//! Tests invoke the built `esg-score` binary with an isolated config file and
//! verify outputs.

use std::path::{Path, PathBuf};
use std::process::Command;

fn demo(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos").join(name)
}

/// Run a CLI command against the config at `config` and return (stdout, stderr, code).
fn run_cli_with(config: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_esg-score"))
        .args(args)
        .env("ESG_SCORE_CONFIG", config)
        .env_remove("ESG_SCORE_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli(args: &[&str]) -> (String, String, i32) {
    let dir = tempfile::tempdir().unwrap();
    run_cli_with(&dir.path().join("config.toml"), args)
}

fn run_cli_success(args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\n{stderr}");
    stdout
}

#[test]
fn test_catalog_list() {
    let stdout = run_cli_success(&["catalog", "list"]);
    assert!(stdout.contains("governance"));
    assert!(stdout.contains("digital-governance"));
    assert!(stdout.contains("10 questions"));
}

#[test]
fn test_catalog_show_json() {
    let stdout = run_cli_success(&["catalog", "show", "social", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["title"], "Social Assessment");
    assert_eq!(parsed["questions"].as_array().unwrap().len(), 8);
}

#[test]
fn test_catalog_show_unknown_domain() {
    let (_, stderr, code) = run_cli(&["catalog", "show", "financial"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown domain"));
}

#[test]
fn test_assess_governance_json() {
    let answers = demo("governance.json");
    let stdout = run_cli_success(&[
        "assess",
        "governance",
        "--answers",
        answers.to_str().unwrap(),
        "--now",
        "2025-04-15T10:00:00Z",
        "--format",
        "json",
    ]);

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["finalScore"], 75);
    assert_eq!(report["rating"], "good");
    assert_eq!(report["mode"], "binned");
    assert_eq!(report["dateCompleted"], "2025-04-15T10:00:00Z");
    assert_eq!(report["items"].as_array().unwrap().len(), 10);
}

#[test]
fn test_assess_authored_toml_catalog() {
    let catalog = demo("supplier-policies.toml");
    let answers = demo("supplier-answers.json");
    let stdout = run_cli_success(&[
        "assess",
        "--catalog",
        catalog.to_str().unwrap(),
        "--answers",
        answers.to_str().unwrap(),
        "--format",
        "text",
    ]);

    assert!(stdout.contains("Supplier Policy Review"));
    assert!(stdout.contains("Final score: 76/100 (Good)"));
}

#[test]
fn test_assess_rejects_unknown_question() {
    let dir = tempfile::tempdir().unwrap();
    let answers = dir.path().join("answers.json");
    std::fs::write(&answers, r#"{ "answers": { "ghost": 1 } }"#).unwrap();

    let (_, stderr, code) = run_cli(&["assess", "social", "--answers", answers.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown question: ghost"));
}

#[test]
fn test_envelope_export_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let exported = dir.path().join("results.txt");
    let answers = demo("digital-governance.json");

    let (_, stderr, code) = run_cli_with(
        &config,
        &[
            "assess",
            "digital-governance",
            "--answers",
            answers.to_str().unwrap(),
            "--format",
            "envelope",
            "--output",
            exported.to_str().unwrap(),
        ],
    );
    assert_eq!(code, 0, "{stderr}");
    assert!(std::fs::read_to_string(&exported).unwrap().starts_with("1234:"));

    let (stdout, _, code) = run_cli_with(
        &config,
        &["results", "open", exported.to_str().unwrap(), "--password", "1234", "--json"],
    );
    assert_eq!(code, 0);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["title"], "Digital Governance Assessment");

    let (_, stderr, code) = run_cli_with(
        &config,
        &["results", "open", exported.to_str().unwrap(), "--password", "0000"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("Incorrect password"));
}

#[test]
fn test_config_set_get_and_mode_override() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let (stdout, _, code) = run_cli_with(&config, &["config", "get", "scoring.mode"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "binned");
    assert!(!config.exists(), "reading config must not create the file");

    let (_, _, code) = run_cli_with(&config, &["config", "set", "scoring.mode", "proportional"]);
    assert_eq!(code, 0);
    assert!(config.exists());

    let (stdout, _, _) = run_cli_with(&config, &["config", "list"]);
    assert!(stdout.contains("scoring.mode = proportional"));

    let (stdout, _, _) = run_cli_with(&config, &["config", "path"]);
    assert_eq!(stdout.trim(), config.display().to_string());

    let answers = demo("comprehensive.json");
    let (stdout, _, code) = run_cli_with(
        &config,
        &["assess", "comprehensive", "--answers", answers.to_str().unwrap(), "--format", "json"],
    );
    assert_eq!(code, 0);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["mode"], "proportional");
}

#[test]
fn test_config_get_unknown_key() {
    let (_, stderr, code) = run_cli(&["config", "get", "ui.theme"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("ui.theme"));
}
