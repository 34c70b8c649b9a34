//! # Path Tree
//!
//! File: cli/src/grouping/tree.rs
//!
//! ## Overview
//!
//! `PathTree` ingests absolute file paths one at a time and keeps the smallest
//! directory tree that still separates them: a node holds a whole run of
//! directories (`a/b/c`) until a later path diverges inside that run, at which
//! point the node is split at the divergence.
//!
//! ## Architecture
//!
//! Nodes live in an arena (`Vec<Node>`) and refer to their children by
//! `NodeId`. A split never moves the node being split: its files and children
//! are moved into a freshly pushed child carrying the excess suffix, and the
//! node itself is shortened to the common prefix. Insertion is a loop over
//! `(node, remainder)` pairs, so its depth is bounded by the number of path
//! segments rather than the call stack.
//!
//! ```text
//! add /top/a/b/x.cpp      add /top/a/c/y.cpp
//!
//! /top                    /top
//! └── a/b                 └── a
//!     └ x.cpp                 ├── b
//!                             │   └ x.cpp
//!                             └── c
//!                                 └ y.cpp
//! ```
//!
//! Results are produced lazily by [`GroupResults`], a depth-first walk that
//! visits children in lexicographic path order.
//!
use super::classifier::{Classifier, SLOT_COUNT, SLOT_TAGS};
use super::{GroupResult, GROUP_SEPARATOR};
use crate::core::error::{GroupingResult, GroupsError};
use std::collections::{BTreeSet, VecDeque};
use std::mem;
use tracing::debug;

/// Index of a node inside a [`PathTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A directory-like grouping unit.
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// Directory path relative to the parent node, without a trailing `/`.
    path: String,
    /// Root markers are never decomposed into child nodes.
    no_split: bool,
    /// Bare filenames owned directly by this node.
    files: BTreeSet<String>,
    /// Child nodes in insertion order.
    children: Vec<NodeId>,
}

impl Node {
    fn new(path: impl Into<String>, no_split: bool) -> Self {
        Self {
            path: path.into(),
            no_split,
            ..Default::default()
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn files(&self) -> &BTreeSet<String> {
        &self.files
    }
}

/// Hierarchical directory tree built by merging and splitting nodes.
#[derive(Debug, Clone)]
pub struct PathTree {
    nodes: Vec<Node>,
    root: NodeId,
    verbose: bool,
}

impl PathTree {
    /// Creates a tree whose root is pinned to `path` and never split.
    ///
    /// An empty `path` creates a virtual root that only holds child branches.
    pub fn rooted(path: &str, verbose: bool) -> Self {
        if verbose {
            debug!("init: path '{}', no_split true", path);
        }
        Self {
            nodes: vec![Node::new(path, true)],
            root: NodeId(0),
            verbose,
        }
    }

    /// Creates a tree with an empty-path virtual root.
    pub fn virtual_root(verbose: bool) -> Self {
        Self::rooted("", verbose)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Children of `id` ordered by their own path.
    pub fn sorted_children(&self, id: NodeId) -> Vec<NodeId> {
        let mut children = self.nodes[id.0].children.clone();
        children.sort_by(|a, b| self.nodes[a.0].path.cmp(&self.nodes[b.0].path));
        children
    }

    /// Number of distinct files held by the tree.
    pub fn file_count(&self) -> usize {
        self.nodes.iter().map(|node| node.files.len()).sum()
    }

    /// Whether `path` shares a directory prefix with the root, i.e. whether
    /// this tree would take the path without routing it elsewhere.
    pub fn accepts(&self, path: &str) -> GroupingResult<bool> {
        Ok(!self.common(self.root, path)?.is_empty())
    }

    /// Inserts a fully-qualified path.
    pub fn add(&mut self, path: &str) -> GroupingResult<()> {
        reject_line_terminator(path)?;

        let mut id = self.root;
        let mut filename = path.to_string();
        loop {
            self.status(id, "add file", &filename);
            let (head, tail) = split_path(&filename);
            let (head, tail) = (head.to_string(), tail.to_string());

            if self.nodes[id.0].path.is_empty() {
                (id, filename) = self.merge_into_children(id, &head, &tail, path)?;
                continue;
            }

            if !filename.contains('/') {
                self.status(id, "accept", &filename);
                self.nodes[id.0].files.insert(filename);
                return Ok(());
            }

            let common = self.common(id, &filename)?;
            if common.is_empty() {
                return Err(GroupsError::invariant(
                    path,
                    &self.nodes[id.0].path,
                    "path shares no directory with the node it was routed to",
                ));
            }

            // head:      [common] [head suffix]
            // node path: [common] [own suffix]
            let head_suffix = head.get(common.len()..).unwrap_or_default().to_string();
            let own_suffix = self.nodes[id.0]
                .path
                .get(common.len()..)
                .unwrap_or_default()
                .to_string();
            self.status(
                id,
                &format!(
                    "common = {}, suffix = {},{}",
                    common, head_suffix, own_suffix
                ),
                &filename,
            );

            if own_suffix.is_empty() && head_suffix.is_empty() {
                self.status(id, "no suffix", &filename);
                filename = tail;
                continue;
            }

            if own_suffix.is_empty() {
                (id, filename) = self.merge_into_children(id, &head_suffix, &tail, path)?;
                continue;
            }

            if self.nodes[id.0].no_split {
                return Err(GroupsError::invariant(
                    path,
                    &self.nodes[id.0].path,
                    "a root node cannot be split",
                ));
            }
            self.status(id, "split", &filename);
            self.split(id, &common, own_suffix);
        }
    }

    /// Lazily yields the non-empty groups of this tree, labelled under
    /// `group_name`. Calling it again restarts the walk from the root.
    pub fn results(&self, group_name: &str, skip_non_source: bool) -> GroupResults<'_> {
        GroupResults {
            tree: self,
            classifier: Classifier::new(skip_non_source),
            stack: vec![Frame {
                node: self.root,
                label: group_name.to_string(),
                parent_path: String::new(),
            }],
            pending: VecDeque::new(),
        }
    }

    /// Longest shared directory prefix of `filename`'s directory and the
    /// node's path, ending with `/`. Empty when nothing meaningful is shared.
    fn common(&self, id: NodeId, filename: &str) -> GroupingResult<String> {
        let node = &self.nodes[id.0];
        if node.path.is_empty() {
            return Ok(String::new());
        }
        if !filename.contains('/') {
            return Err(GroupsError::invalid_input(
                filename,
                "expected an absolute path containing '/'",
            ));
        }

        let dirname = format!("{}/", split_path(filename).0);
        let own = format!("{}/", node.path);
        let prefix = common_prefix(&dirname, &own);
        let common = match prefix.rfind('/') {
            // A lone leading '/' is not a shared directory.
            None | Some(0) => return Ok(String::new()),
            Some(index) => &prefix[..=index],
        };

        if !node.no_split || common == own {
            Ok(common.to_string())
        } else {
            Ok(String::new())
        }
    }

    /// Hands `head_suffix/tail` to the first child sharing a directory with
    /// it, or creates a new child `head_suffix` that receives `tail`.
    fn merge_into_children(
        &mut self,
        id: NodeId,
        head_suffix: &str,
        tail: &str,
        original: &str,
    ) -> GroupingResult<(NodeId, String)> {
        if head_suffix.is_empty() {
            return Err(GroupsError::invalid_input(
                original,
                "path has no directory component",
            ));
        }

        let filename = format!("{}/{}", head_suffix, tail);
        self.status(id, "try merge", &filename);
        for &child in &self.nodes[id.0].children {
            if !self.common(child, &filename)?.is_empty() {
                return Ok((child, filename));
            }
            self.status(
                id,
                &format!("not found in {}", self.nodes[child.0].path),
                &filename,
            );
        }

        self.status(
            id,
            &format!("merge failed, creating new dir {}", head_suffix),
            &filename,
        );
        let child = self.push(Node::new(head_suffix, false));
        self.nodes[id.0].children.push(child);
        Ok((child, tail.to_string()))
    }

    /// Shortens node `id` to `common` (minus its trailing `/`) and moves its
    /// previous contents into a new child named `own_suffix`.
    fn split(&mut self, id: NodeId, common: &str, own_suffix: String) {
        let node = &mut self.nodes[id.0];
        let files = mem::take(&mut node.files);
        let children = mem::take(&mut node.children);

        let moved = self.push(Node {
            path: own_suffix,
            no_split: false,
            files,
            children,
        });

        let node = &mut self.nodes[id.0];
        node.path = common[..common.len() - 1].to_string();
        node.children = vec![moved];
    }

    fn push(&mut self, node: Node) -> NodeId {
        if self.verbose {
            debug!("init: path '{}', no_split {}", node.path, node.no_split);
        }
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn status(&self, id: NodeId, status: &str, filename: &str) {
        if self.verbose {
            debug!(
                "[dir: {}] file: {} - {}",
                self.nodes[id.0].path, filename, status
            );
        }
    }
}

/// Rejects paths that still carry a line terminator from their source.
pub(crate) fn reject_line_terminator(path: &str) -> GroupingResult<()> {
    if path.ends_with('\n') || path.ends_with('\r') {
        return Err(GroupsError::invalid_input(
            path,
            "path ends with a line terminator",
        ));
    }
    Ok(())
}

/// Splits at the last `/` into (directory, filename). Trailing slashes are
/// dropped from the directory unless it consists only of slashes.
fn split_path(path: &str) -> (&str, &str) {
    let cut = path.rfind('/').map_or(0, |index| index + 1);
    let (head, tail) = path.split_at(cut);
    let trimmed = head.trim_end_matches('/');
    if trimmed.is_empty() {
        (head, tail)
    } else {
        (trimmed, tail)
    }
}

/// Character-wise common prefix of two strings.
fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len: usize = a
        .chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(c, _)| c.len_utf8())
        .sum();
    &a[..len]
}

/// Forward-slash join that never doubles a separator.
fn join(base: &str, rest: &str) -> String {
    if base.is_empty() {
        rest.to_string()
    } else if base.ends_with('/') {
        format!("{}{}", base, rest)
    } else {
        format!("{}/{}", base, rest)
    }
}

struct Frame {
    node: NodeId,
    /// Label inherited from the parent node.
    label: String,
    /// Fully-qualified path of the parent node.
    parent_path: String,
}

/// Lazy depth-first iterator over the groups of a [`PathTree`].
pub struct GroupResults<'a> {
    tree: &'a PathTree,
    classifier: Classifier,
    stack: Vec<Frame>,
    pending: VecDeque<GroupResult>,
}

impl GroupResults<'_> {
    fn expand(&mut self, frame: Frame) {
        let node = &self.tree.nodes[frame.node.0];
        let label = if node.no_split || node.path.is_empty() {
            frame.label
        } else {
            format!("{}{}{}", frame.label, GROUP_SEPARATOR, node.path)
        };
        let full_path = join(&frame.parent_path, &node.path);

        let mut slots: [Vec<String>; SLOT_COUNT] = Default::default();
        for file in &node.files {
            if let Some(bucket) = self.classifier.classify(file) {
                slots[bucket.slot()].push(join(&full_path, file));
            }
        }
        for (files, tag) in slots.into_iter().zip(SLOT_TAGS) {
            if files.is_empty() {
                continue;
            }
            let name = match tag {
                Some(tag) => format!("{}{}{}", label, GROUP_SEPARATOR, tag),
                None => label.clone(),
            };
            self.pending.push_back(GroupResult { name, files });
        }

        for child in self.tree.sorted_children(frame.node).into_iter().rev() {
            self.stack.push(Frame {
                node: child,
                label: label.clone(),
                parent_path: full_path.clone(),
            });
        }
    }
}

impl Iterator for GroupResults<'_> {
    type Item = GroupResult;

    fn next(&mut self) -> Option<GroupResult> {
        loop {
            if let Some(result) = self.pending.pop_front() {
                return Some(result);
            }
            let frame = self.stack.pop()?;
            self.expand(frame);
        }
    }
}
