//! # srcgroups CLI Classify Integration Tests
//!
//! File: cli/tests/classify.rs
//!

mod common;
use common::*;

#[test]
fn test_classify_reports_buckets() {
    srcgroups_cmd()
        .args([
            "classify",
            "sugar.cmake",
            "/top/lib/vec.tpp",
            "vec.fpp",
            "xcode.environment",
            "main.cc",
            "notes.md",
        ])
        .assert()
        .success()
        .stdout(
            "sugar.cmake\tsugar\n\
             /top/lib/vec.tpp\ttemplate\n\
             vec.fpp\tforward-decl\n\
             xcode.environment\tbuild-meta\n\
             main.cc\tregular\n\
             notes.md\tany\n",
        );
}

#[test]
fn test_classify_skip_non_source() {
    srcgroups_cmd()
        .args(["c", "--skip-non-source", "notes.md", "a.inl"])
        .assert()
        .success()
        .stdout("notes.md\t-\na.inl\tregular\n");
}

#[test]
fn test_classify_requires_names() {
    srcgroups_cmd().arg("classify").assert().failure();
}
