#![allow(clippy::unwrap_used)]
// CLI surface tests: argument parsing and offline commands only.
// Anything that would open a connection is exercised in campus-core's
// wiremock suites instead.

use assert_cmd::Command;
use predicates::prelude::*;

fn campus() -> Command {
    Command::cargo_bin("campus").unwrap()
}

#[test]
fn no_args_shows_help() {
    campus()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: campus"));
}

#[test]
fn help_lists_resource_groups() {
    campus()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("students"))
        .stdout(predicate::str::contains("attendance"))
        .stdout(predicate::str::contains("fees"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn version_flag_works() {
    campus()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("campus"));
}

#[test]
fn completions_generate_without_a_server() {
    campus()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("campus"));
}

#[test]
fn invalid_date_flag_is_rejected_before_any_request() {
    campus()
        .args([
            "--server",
            "http://127.0.0.1:9",
            "fees",
            "add",
            "--student",
            "1",
            "--amount",
            "100",
            "--due",
            "not-a-date",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn unknown_subcommand_fails_with_usage() {
    campus()
        .arg("unknown-noise")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
