//! # Generate Command Input
//!
//! File: cli/src/commands/generate/input.rs
//!
//! ## Overview
//!
//! Collects the paths to group. Two sources are supported and may be combined:
//!
//! - a list file (or stdin with `-`) whose entries are separated by ';'
//!   and/or newlines, as written by the build scripts that call srcgroups;
//! - directory scans, which walk a directory with `walkdir` and report every
//!   regular file with forward-slash separators.
//!
use super::config::InputSources;
use crate::core::error::{GroupsError, Result};
use anyhow::{anyhow, Context};
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Splits a path list into entries. Line terminators are stripped and empty
/// entries (e.g. from a trailing ';') are ignored.
pub fn parse_source_list(content: &str) -> Vec<String> {
    content
        .lines()
        .flat_map(|line| line.split(';'))
        .filter(|entry| {
            if entry.is_empty() {
                debug!("Ignoring empty entry in source list");
                return false;
            }
            true
        })
        .map(str::to_string)
        .collect()
}

/// Reads a list file, or stdin when `path` is `-`.
pub async fn read_source_list(path: &Path) -> Result<Vec<String>> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("Failed to read source list from stdin")?;
        buffer
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read source list: {}", path.display()))?
    };
    Ok(parse_source_list(&content))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Lists every regular file below `dir` in a stable order.
pub fn scan_directory(dir: &Path) -> Result<Vec<String>> {
    let root = dir.canonicalize().map_err(|e| {
        anyhow!(GroupsError::FileSystem(format!(
            "Cannot scan '{}': {}",
            dir.display(),
            e
        )))
    })?;
    if !root.is_dir() {
        return Err(anyhow!(GroupsError::FileSystem(format!(
            "Cannot scan '{}': not a directory",
            dir.display()
        ))));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry))
    {
        let entry =
            entry.with_context(|| format!("Failed while scanning '{}'", root.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.path().to_string_lossy().replace('\\', "/"));
        }
    }
    debug!("Scanned {} file(s) under {}", files.len(), root.display());
    Ok(files)
}

/// Gathers the paths of every configured source, list file first.
pub async fn collect_sources(inputs: &InputSources) -> Result<Vec<String>> {
    let mut sources = Vec::new();
    if let Some(input) = &inputs.input {
        sources.extend(read_source_list(input).await?);
    }
    for dir in &inputs.scan {
        sources.extend(scan_directory(dir)?);
    }
    info!("Collected {} path(s) to group", sources.len());
    Ok(sources)
}
