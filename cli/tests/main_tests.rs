//! # srcgroups CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Top-level behaviour of the `srcgroups` binary: standard flags and
//! argument errors.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_version_flag() {
    srcgroups_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_commands() {
    srcgroups_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("generate")
            .and(predicate::str::contains("classify"))
            .and(predicate::str::contains("tree")),
    );
}

#[test]
fn test_missing_subcommand_fails() {
    srcgroups_cmd().assert().failure();
}

#[test]
fn test_generate_requires_an_input() {
    srcgroups_cmd()
        .args(["generate", "--top", "/top"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input"));
}
