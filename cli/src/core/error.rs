//! # srcgroups Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout srcgroups. The grouping
//! engine reports failures through the typed `GroupsError` enum; command
//! handlers work with `anyhow` so they can attach context (file names, the
//! option being resolved, ...) on the way up to `main`.
//!
//! ## Architecture
//!
//! - `GroupsError`: a `thiserror` enum covering malformed input paths,
//!   broken tree invariants, configuration, filesystem and argument errors.
//! - `GroupingResult<T>`: `Result` alias used by the grouping engine.
//! - `Result<T>`: alias for `anyhow::Result<T>` used by command handlers.
//!
//! Every grouping error is fatal: the run is a single deterministic batch
//! pass, so nothing is retried and nothing is partially recovered.
//!
//! ## Examples
//!
//! ```rust
//! // Inside the engine
//! if path.ends_with('\n') {
//!     return Err(GroupsError::InvalidInput {
//!         path: path.to_string(),
//!         reason: "path ends with a line terminator".into(),
//!     });
//! }
//!
//! // Inside a command handler
//! generator.add(&path).with_context(|| format!("Failed to group '{}'", path))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for srcgroups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupsError {
    /// The caller supplied a path that breaks an input precondition.
    #[error("Invalid input path '{path}': {reason}")]
    InvalidInput { path: String, reason: String },

    /// The tree structure is not what the merge/split logic expects.
    #[error("Internal invariant violated while adding '{path}' at node '{node}': {detail}")]
    InternalInvariant {
        path: String,
        node: String,
        detail: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

impl GroupsError {
    pub(crate) fn invalid_input(path: &str, reason: impl Into<String>) -> Self {
        GroupsError::InvalidInput {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invariant(path: &str, node: &str, detail: impl Into<String>) -> Self {
        GroupsError::InternalInvariant {
            path: path.to_string(),
            node: node.to_string(),
            detail: detail.into(),
        }
    }
}

/// Result type returned by the grouping engine.
pub type GroupingResult<T> = std::result::Result<T, GroupsError>;

/// Type alias for Result using anyhow::Error for command handlers.
pub type Result<T> = anyhow::Result<T>;
