//! # srcgroups Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by the grouping engine and the commands:
//! - `config`: loading, merging and validation of `.srcgroups.toml` settings
//! - `error`: the `GroupsError` type and the `Result` aliases
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{GroupsError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
