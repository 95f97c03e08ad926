use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_pageprobe_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("pageprobe")
}

#[test]
fn test_analyze_requires_url_argument() {
    let mut cmd = Command::new(get_pageprobe_bin());
    cmd.arg("analyze");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_analyze_rejects_empty_url() {
    let mut cmd = Command::new(get_pageprobe_bin());
    cmd.arg("analyze").arg("");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("URL is required"));
}

#[test]
fn test_analyze_rejects_whitespace_url() {
    let mut cmd = Command::new(get_pageprobe_bin());
    cmd.arg("analyze").arg("   ");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("URL is required"));
}

#[test]
fn test_analyze_rejects_malformed_url() {
    let mut cmd = Command::new(get_pageprobe_bin());
    cmd.arg("analyze").arg("not a url");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL format"));
}

#[test]
fn test_analyze_rejects_unknown_format() {
    let mut cmd = Command::new(get_pageprobe_bin());
    cmd.arg("analyze")
        .arg("example.com")
        .arg("--format")
        .arg("xml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// Analyses of real URLs need a Chrome install and network access, so the
// happy path is exercised manually and through the server's router tests.

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::new(get_pageprobe_bin());
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("completions"));
}
