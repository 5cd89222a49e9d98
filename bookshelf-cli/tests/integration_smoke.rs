//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn bookshelf() -> Command {
    let mut cmd = Command::cargo_bin("bookshelf").unwrap();
    cmd.env_remove("API_KEY").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    bookshelf()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    bookshelf()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("x-api-key"))
        .stdout(predicate::str::contains("--in-memory"));
}

#[test]
fn test_migrate_help() {
    bookshelf()
        .arg("migrate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_serve_requires_api_key() {
    bookshelf()
        .arg("serve")
        .arg("--in-memory")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--api-key"));
}

#[test]
fn test_serve_rejects_empty_api_key() {
    bookshelf()
        .args(["serve", "--in-memory", "--api-key", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid API_KEY"));
}
