//! CLI behavior through the compiled binary.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

use common::{write_rules_file, write_skill_file};

fn fixture_root() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_skill_file(
        &tmp.path().join("my-agent-skills/cicd/SKILL.md"),
        "managing-cicd-workflow",
        "Deploy and pipeline workflow helper",
        &["deploy to production", "pipeline failed"],
    );
    write_rules_file(
        &tmp.path().join("my-agent-skills/global-rules.md"),
        "- **Deployment** → `cicd-skills`\n",
    );
    tmp
}

#[test]
fn cli_help() {
    let mut cmd = Command::cargo_bin("skr").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn cli_version() {
    let mut cmd = Command::cargo_bin("skr").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn index_json_reports_skills() {
    let tmp = fixture_root();
    let mut cmd = Command::cargo_bin("skr").unwrap();
    let output = cmd
        .args(["--quiet", "--format", "json", "index"])
        .arg("--root")
        .arg(tmp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let payload: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["load_report"]["total_skills"], 1);
    assert_eq!(payload["load_report"]["route_hints"], 1);
    assert_eq!(payload["config"]["max_skill_reads"], 3);
}

#[test]
fn schedule_json_returns_decisions_and_diagnostics() {
    let tmp = fixture_root();
    let mut cmd = Command::cargo_bin("skr").unwrap();
    let output = cmd
        .args([
            "--quiet",
            "--format",
            "json",
            "schedule",
            "--task",
            "Can you help me deploy to production now?",
            "--top",
            "3",
        ])
        .arg("--root")
        .arg(tmp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let payload: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["decisions"][0]["skill_id"], "managing-cicd-workflow");
    assert_eq!(payload["schedule_diagnostics"]["detailed_reads_used"], 1);
    assert_eq!(payload["schedule_diagnostics"]["guardrail_triggered"], false);
}

#[test]
fn schedule_text_prints_summary_and_decisions() {
    let tmp = fixture_root();
    let mut cmd = Command::cargo_bin("skr").unwrap();
    cmd.args(["--quiet", "schedule", "--task", "deploy to production"])
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Skill preload summary"))
        .stdout(predicate::str::contains("Scheduled skills"))
        .stdout(predicate::str::contains("managing-cicd-workflow"));
}

#[test]
fn schedule_text_warns_when_guardrail_trips() {
    let tmp = TempDir::new().unwrap();
    for idx in 0..4 {
        write_skill_file(
            &tmp.path().join(format!("skills/deploy-{idx}/SKILL.md")),
            &format!("deploy-skill-{idx}"),
            "Deploy helper for production release",
            &[&format!("deploy flow trigger {idx}")],
        );
    }

    let mut cmd = Command::cargo_bin("skr").unwrap();
    cmd.args([
        "--quiet",
        "schedule",
        "--task",
        "Please deploy to production",
        "--max-skill-reads",
        "2",
    ])
    .arg("--root")
    .arg(tmp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("context guardrail triggered"))
    .stdout(predicate::str::contains("sample skipped skills"));
}

#[test]
fn unknown_config_key_fails_eagerly() {
    let tmp = fixture_root();
    std::fs::write(
        tmp.path().join("skr.toml"),
        "[scheduler]\nmax_detailed_reads = 2\nbogus_key = true\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("skr").unwrap();
    cmd.args(["--quiet", "index"])
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
}

#[test]
fn json_mode_reports_errors_on_stdout() {
    let tmp = fixture_root();
    std::fs::write(tmp.path().join("skr.toml"), "not = valid = toml\n").unwrap();

    let mut cmd = Command::cargo_bin("skr").unwrap();
    let output = cmd
        .args(["--quiet", "--format", "json", "index"])
        .arg("--root")
        .arg(tmp.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let payload: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["error"], true);
}
