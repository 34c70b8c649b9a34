//! # srcgroups Grouping Engine
//!
//! File: cli/src/grouping/mod.rs
//!
//! ## Overview
//!
//! This module turns a flat list of file paths into nested source groups.
//! It is pure, in-memory and single-threaded: no I/O happens here, the
//! command handlers feed paths in and render the groups that come out.
//!
//! ## Architecture
//!
//! - `classifier`: decides which bucket (`[sugar]`, `[tmpl]`, `[fwd]`,
//!   `[cmake]`, plain) a bare filename belongs to.
//! - `tree`: the arena-backed `PathTree` that merges and splits directory
//!   runs, and the lazy `GroupResults` iterator over it.
//! - `generator`: routes each path either to the project ("top") tree or to
//!   the third-party tree and chains their results.
//!
//! ## Usage
//!
//! ```rust
//! use crate::grouping::Generator;
//!
//! let mut generator = Generator::new("/home/me/project", false);
//! generator.add("/home/me/project/src/main.cpp")?;
//! generator.add("/usr/include/boost/any.hpp")?;
//!
//! for group in generator.results("[sources]", "[third party]", false) {
//!     println!("{}: {:?}", group.name, group.files);
//! }
//! ```
//!
use serde::Serialize;

pub mod classifier;
pub mod generator;
pub mod tree;

pub use classifier::Classifier;
pub use generator::Generator;
pub use tree::PathTree;

/// Separator between nested group label segments.
pub const GROUP_SEPARATOR: char = '\\';

/// A group label paired with the fully-qualified files it contains.
///
/// Never constructed with an empty file list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupResult {
    pub name: String,
    pub files: Vec<String>,
}
