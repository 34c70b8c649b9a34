//! # Tree Command
//!
//! File: cli/src/commands/tree.rs
//!
//! ## Overview
//!
//! `srcgroups tree` prints the directory trees built from the input, before
//! any classification. Each node shows the path segment it owns, so it is
//! easy to see where the grouping decided to split.
//!
//! ```text
//! [sources] /work
//! ├── engine/
//! │   ├── audio/
//! │   │   └── mixer.cpp
//! │   └── render/
//! │       ├── mesh.cpp
//! │       └── mesh.hpp
//! └── CMakeLists.txt
//! [third party]
//! └── /opt/sdk/include/
//!     └── sdk.h
//! ```
//!
use super::generate::{build_generator, config::InputSources, input, InputArgs};
use crate::core::config as core_config;
use crate::core::error::Result;
use crate::grouping::{tree::NodeId, PathTree};
use anyhow::Context;
use clap::Parser;
use std::fmt::Write as FmtWrite;
use tracing::debug;

/// Connector for intermediate entries.
const TEE: &str = "├── ";
/// Connector for the last entry of a node.
const ELBOW: &str = "└── ";
/// Continuation below an intermediate entry.
const PIPE: &str = "│   ";
/// Continuation below the last entry.
const SPACER: &str = "    ";

/// # Tree Command Arguments (`TreeArgs`)
#[derive(Parser, Debug)]
pub struct TreeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Label printed above the top tree.
    #[arg(long)]
    pub top_group_name: Option<String>,

    /// Label printed above the third-party tree.
    #[arg(long)]
    pub third_party_group_name: Option<String>,
}

enum Entry<'a> {
    Node(NodeId),
    File(&'a str),
}

fn walk(tree: &PathTree, id: NodeId, prefix: &mut String, output: &mut String) -> Result<()> {
    let node = tree.node(id);
    let entries: Vec<Entry<'_>> = tree
        .sorted_children(id)
        .into_iter()
        .map(Entry::Node)
        .chain(node.files().iter().map(|file| Entry::File(file)))
        .collect();

    let count = entries.len();
    for (index, entry) in entries.into_iter().enumerate() {
        let last = index + 1 == count;
        let connector = if last { ELBOW } else { TEE };
        match entry {
            Entry::File(name) => writeln!(output, "{}{}{}", prefix, connector, name)?,
            Entry::Node(child) => {
                writeln!(output, "{}{}{}/", prefix, connector, tree.node(child).path())?;
                let depth = prefix.len();
                prefix.push_str(if last { SPACER } else { PIPE });
                walk(tree, child, prefix, output)?;
                prefix.truncate(depth);
            }
        }
    }
    Ok(())
}

/// Renders `tree` below a `title` line.
pub fn render_tree(tree: &PathTree, title: &str) -> Result<String> {
    let mut output = String::new();
    let root = tree.node(tree.root());
    if root.path().is_empty() {
        writeln!(output, "{}", title)?;
    } else {
        writeln!(output, "{} {}", title, root.path())?;
    }
    walk(tree, tree.root(), &mut String::new(), &mut output)
        .context("Failed to render grouping tree")?;
    Ok(output)
}

pub async fn handle_tree(args: TreeArgs, verbose: bool) -> Result<()> {
    debug!("Handling tree command with args: {:?}", args);

    let file_config = core_config::load_config().context("Failed to load configuration")?;
    let inputs = InputSources::resolve(args.input, &file_config)?;
    let top_name = args
        .top_group_name
        .unwrap_or_else(|| file_config.groups.top_group_name.clone());
    let third_party_name = args
        .third_party_group_name
        .unwrap_or_else(|| file_config.groups.third_party_group_name.clone());

    let sources = input::collect_sources(&inputs).await?;
    let generator = build_generator(&inputs.top, &sources, verbose)?;

    print!("{}", render_tree(generator.top(), &top_name)?);
    if generator.third_party().file_count() > 0 {
        print!("{}", render_tree(generator.third_party(), &third_party_name)?);
    }
    Ok(())
}
