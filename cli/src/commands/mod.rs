//! # srcgroups Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Aggregates the top-level commands of the srcgroups CLI. Each command
//! defines its own arguments structure and an async `handle_*` function
//! called from `main.rs`.
//!
//! - `generate`: group a list of paths and print the groups (text or JSON)
//! - `classify`: show which bucket a file name falls into
//! - `tree`: print the directory trees built from the input
//!

/// Path grouping for IDE project generators. Includes configuration, input and output handling.
pub mod generate;
/// File name classification (sugar, template, forward declaration, build metadata, ...).
pub mod classify;
/// Visualisation of the merged directory trees.
pub mod tree;
