//! # srcgroups CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test runs
//! the compiled `srcgroups` binary inside an isolated temporary directory so
//! neither the user's configuration nor a `.srcgroups.toml` from the checkout
//! leaks into the results.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Command pointing at the compiled `srcgroups` binary.
pub fn srcgroups_cmd() -> Command {
    Command::cargo_bin("srcgroups").expect("Failed to find srcgroups binary for testing")
}

/// Command running inside `workspace`, with the home and config directories
/// redirected into it and `RUST_LOG` cleared.
pub fn isolated_cmd(workspace: &Path) -> Command {
    let mut cmd = srcgroups_cmd();
    cmd.current_dir(workspace)
        .env("HOME", workspace)
        .env("XDG_CONFIG_HOME", workspace.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("SRCGROUPS_TOP");
    cmd
}

/// Temporary workspace marked as a repository root, so the upward search for
/// `.srcgroups.toml` stops inside it.
pub fn workspace() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp workspace");
    fs::create_dir_all(dir.path().join(".git")).expect("Failed to create .git marker");
    dir
}

/// Writes a source list file into `workspace` and returns its path.
pub fn write_list(workspace: &Path, entries: &[&str]) -> std::path::PathBuf {
    let list = workspace.join("sources.txt");
    fs::write(&list, entries.join("\n")).expect("Failed to write source list");
    list
}
