//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Create a folder with one topic file and return (dir, file path).
fn topic_dir(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("topic.htm");
    std::fs::write(&file, content).unwrap();
    (dir, file)
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn no_args_shows_help() {
    cmd().assert().failure().stderr(predicate::str::contains("Usage:"));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    cmd()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_outputs_valid_json() {
    let output = cmd().arg("info").arg("--json").assert().success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("info --json should output valid JSON");

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// Check Command
// =============================================================================

#[test]
fn check_flags_ui_terms_and_fails() {
    let (dir, file) = topic_dir("<p>Click OK to continue.</p>");
    cmd()
        .current_dir(dir.path())
        .args(["check", file.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[UI Term]"));
}

#[test]
fn check_passes_when_rule_is_skipped() {
    let (dir, file) = topic_dir("<p>Click OK to continue.</p>");
    cmd()
        .current_dir(dir.path())
        .args(["check", file.to_str().unwrap(), "--skip", "ui"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no issues"));
}

#[test]
fn check_json_reports_issue_records() {
    let (dir, file) = topic_dir("<p>The report will be finished soon.</p>");
    let output = cmd()
        .current_dir(dir.path())
        .args(["check", file.to_str().unwrap(), "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert!(json["issues"].as_u64().unwrap() >= 1);
    assert!(!json["records"].as_array().unwrap().is_empty());
}

#[test]
fn check_applies_cli_terms() {
    let (dir, file) = topic_dir("<p>Press the button.</p>");
    cmd()
        .current_dir(dir.path())
        .args([
            "check",
            file.to_str().unwrap(),
            "--term",
            "Press=Select",
            "--skip",
            "passive",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[Custom Term]"));
}

#[test]
fn check_missing_file_is_an_error() {
    cmd()
        .args(["check", "/no/such/topic.htm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

// =============================================================================
// Scan Command
// =============================================================================

#[test]
fn scan_writes_mirrored_cleaned_output() {
    let (dir, _file) = topic_dir("<p>Click OK to continue.</p>");
    cmd()
        .current_dir(dir.path())
        .args(["scan", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("cleaned_output"));

    let cleaned = dir.path().join("cleaned_output/topic.htm");
    let content = std::fs::read_to_string(cleaned).unwrap();
    assert!(content.contains("&lt;b&gt;OK&lt;/b&gt;"));
}

#[test]
fn rescan_does_not_ingest_prior_output() {
    let (dir, _file) = topic_dir("<p>Click OK now.</p>");
    for _ in 0..2 {
        cmd()
            .current_dir(dir.path())
            .args(["scan", "."])
            .assert()
            .success();
    }

    assert!(!dir.path().join("cleaned_output/cleaned_output").exists());
    let content =
        std::fs::read_to_string(dir.path().join("cleaned_output/topic.htm")).unwrap();
    assert!(content.contains("&lt;b&gt;OK&lt;/b&gt;"));
    assert!(!content.contains("&lt;b&gt;&lt;b&gt;"));
}

#[test]
fn scan_respects_out_flag() {
    let (dir, _file) = topic_dir("<p>Nothing here.</p>");
    let out = dir.path().join("elsewhere");
    cmd()
        .current_dir(dir.path())
        .args(["scan", ".", "--out", out.to_str().unwrap()])
        .assert()
        .success();
    assert!(out.join("topic.htm").exists());
}

#[test]
fn scan_export_log_writes_csv() {
    let (dir, _file) = topic_dir("<p>The report will be finished soon.</p>");
    cmd()
        .current_dir(dir.path())
        .args(["scan", ".", "--export-log"])
        .assert()
        .success();

    let csv = std::fs::read_to_string(dir.path().join("violations_log.csv")).unwrap();
    assert!(csv.starts_with("Type,Issue,Suggestion,Original Text"));
    assert!(csv.contains("Future Tense"));
}

#[test]
fn scan_empty_folder_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["scan", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("no topic files"));
}

#[test]
fn scan_json_summarizes_the_run() {
    let (dir, _file) = topic_dir("<p>Click OK to continue.</p>");
    let output = cmd()
        .current_dir(dir.path())
        .args(["scan", ".", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["files"], 1);
    assert_eq!(json["changed_files"], 1);
}

// =============================================================================
// Review Command
// =============================================================================

#[test]
fn review_yes_applies_in_place() {
    let (dir, file) = topic_dir("<p>Click OK to continue.</p>");
    cmd()
        .current_dir(dir.path())
        .args(["review", ".", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("updated in place"));

    let content = std::fs::read_to_string(file).unwrap();
    assert!(content.contains("&lt;b&gt;OK&lt;/b&gt;"));
}

#[test]
fn review_rejecting_leaves_file_untouched() {
    let (dir, file) = topic_dir("<p>Click OK to continue.</p>");
    cmd()
        .current_dir(dir.path())
        .args(["review", "."])
        .write_stdin("n\n")
        .assert()
        .success();

    let content = std::fs::read_to_string(file).unwrap();
    assert_eq!(content, "<p>Click OK to continue.</p>");
}

#[test]
fn review_json_requires_yes() {
    let dir = TempDir::new().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["review", ".", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn config_file_terms_are_applied() {
    let (dir, file) = topic_dir("<p>We utilize the tool.</p>");
    std::fs::write(
        dir.path().join("mstp-lint.toml"),
        "[[terms]]\nfind = \"utilize\"\nreplace = \"use\"\n",
    )
    .unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["check", file.to_str().unwrap(), "--skip", "passive"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[Custom Term]"))
        .stdout(predicate::str::contains("We use the tool."));
}

#[test]
fn config_file_can_disable_rules() {
    let (dir, file) = topic_dir("<p>Click OK to continue.</p>");
    std::fs::write(dir.path().join("mstp-lint.toml"), "[rules]\nui = false\n").unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["check", file.to_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn invalid_config_fails_fast() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("mstp-lint.toml"), "log_level = 42\n").unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}
