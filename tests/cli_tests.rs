mod common;

use common::sample_record;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let trials = dir.path().join("Results");
        fs::create_dir(&trials).unwrap();

        fs::write(
            trials.join("trial-0.yaml"),
            sample_record("ArcType", "hello world", "hello world", 30.0),
        )
        .unwrap();
        fs::write(
            trials.join("trial-1.yaml"),
            sample_record("Raycast", "quick fox", "quick fix", 20.0),
        )
        .unwrap();

        Self { dir }
    }

    fn trials(&self) -> String {
        self.dir.path().join("Results").to_string_lossy().to_string()
    }

    fn path(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join(name)
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_entrylab"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_summary_lists_layouts() {
    let ctx = TestContext::new();
    let trials = ctx.trials();
    let output = run(&["summary", "-d", &trials]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("TRIAL SUMMARY: 2 challenges"));
    assert!(stdout.contains("ArcType"));
    assert!(stdout.contains("Raycast"));

    // Arc speed row: 10 words over half a minute, single sample so std is 0
    let row = Regex::new(r"ArcType\s*\|\s*Blind\s*\|\s*1\s*\|\s*4\.00 ± 0\.00").unwrap();
    assert!(row.is_match(&stdout), "unexpected summary:\n{}", stdout);
}

#[test]
fn test_cli_summary_layout_filter() {
    let ctx = TestContext::new();
    let trials = ctx.trials();
    let output = run(&["summary", "-d", &trials, "--layout", "ray"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("Raycast"));
    assert!(!stdout.contains("ArcType"));
}

#[test]
fn test_cli_single_trial_selection() {
    let ctx = TestContext::new();
    let trials = ctx.trials();
    let output = run(&["summary", "-d", &trials, "-t", "trial-1", "--include-practice"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("TRIAL SUMMARY: 2 challenges"));
    assert!(stdout.contains("Practice"));
    assert!(!stdout.contains("ArcType"));
}

#[test]
fn test_cli_export_writes_reports() {
    let ctx = TestContext::new();
    let trials = ctx.trials();
    let out = ctx.path("Reports");
    let out_str = out.to_string_lossy().to_string();

    let output = run(&["export", "-d", &trials, "-o", &out_str]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Exported 2 layouts / 2 challenges"));

    for name in ["summary.csv", "challenges.csv", "positions.csv", "summary.json"] {
        assert!(Path::new(&out).join(name).is_file(), "{} missing", name);
    }

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let mut lines = summary.lines();
    assert!(lines.next().unwrap().starts_with("layout,challenges,blind_wpm_mean"));
    assert_eq!(lines.count(), 2);

    let positions = fs::read_to_string(out.join("positions.csv")).unwrap();
    assert_eq!(positions.lines().count(), 1 + 4);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
    assert_eq!(json["per_challenge"].as_array().unwrap().len(), 2);
}

#[test]
fn test_cli_inspect_shows_metrics() {
    let ctx = TestContext::new();
    let trials = ctx.trials();
    let output = run(&["inspect", "-d", &trials, "-t", "trial-0", "-i", "0"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("layout:     ArcType"));
    assert!(stdout.contains("accuracy:   recorded 1.000, recomputed 1.000"));
    let wpm = Regex::new(r"WPM:\s+4\.000").unwrap();
    assert!(wpm.is_match(&stdout), "unexpected inspect output:\n{}", stdout);
}

#[test]
fn test_cli_inspect_out_of_range_fails() {
    let ctx = TestContext::new();
    let trials = ctx.trials();
    let output = run(&["inspect", "-d", &trials, "-i", "99"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("out of range"));
}

#[test]
fn test_cli_config_file_and_flag_precedence() {
    let ctx = TestContext::new();
    let trials = ctx.trials();
    let config = ctx.path("analysis.json");
    fs::write(&config, r#"{ "outlier_m": 3.0, "include_practice": true }"#).unwrap();
    let config_str = config.to_string_lossy().to_string();

    let output = run(&["summary", "-d", &trials, "--config", &config_str]);
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("4 challenges, outlier m = 3"));

    let output = run(&[
        "summary",
        "-d",
        &trials,
        "--config",
        &config_str,
        "--outlier-m",
        "1.5",
    ]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("outlier m = 1.5"));
}

#[test]
fn test_cli_rejects_invalid_config() {
    let ctx = TestContext::new();
    let trials = ctx.trials();
    let output = run(&["summary", "-d", &trials, "--outlier-m=-1"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("outlier_m must be a positive number"));
}

#[test]
fn test_cli_unknown_layout_filter_warns_with_user_text() {
    let ctx = TestContext::new();
    let trials = ctx.trials();
    let output = run(&["summary", "-d", &trials, "--layout", "QwertyPad"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'QwertyPad' matches no known layout"), "{}", stderr);
    assert!(stdout_of(&output).contains("No layouts found"));
}
