//! CLI startup tests: argument validation and --init, none of which need a
//! browser. The binary must fail fast on bad input before any Chrome
//! process is launched.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn appcatfinder() -> Command {
    Command::cargo_bin("appcatfinder").expect("binary built")
}

#[test]
fn test_init_creates_config_template() {
    let tmp = TempDir::new().expect("create temp dir");

    appcatfinder()
        .current_dir(tmp.path())
        .arg("--init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created default configuration"));

    let config_path = tmp.path().join("config").join("appcatfinder.toml");
    let content = std::fs::read_to_string(config_path).expect("config written");
    assert!(content.contains("page_url"));
    assert!(content.contains("#tbSearch"));
}

#[test]
fn test_init_refuses_to_overwrite_existing_config() {
    let tmp = TempDir::new().expect("create temp dir");

    appcatfinder()
        .current_dir(tmp.path())
        .arg("--init")
        .assert()
        .success();

    appcatfinder()
        .current_dir(tmp.path())
        .arg("--init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_missing_input_file_aborts_before_any_lookup() {
    let tmp = TempDir::new().expect("create temp dir");

    appcatfinder()
        .current_dir(tmp.path())
        .args(["--input", "does-not-exist.xlsx"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.xlsx"));
}

#[test]
fn test_unknown_output_format_is_rejected() {
    appcatfinder()
        .args(["--output-format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Output format"));
}
