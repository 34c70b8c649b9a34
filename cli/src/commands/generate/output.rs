//! # Generate Command Output
//!
//! File: cli/src/commands/generate/output.rs
//!
//! ## Overview
//!
//! Renders grouping results in one of two formats and writes them out.
//!
//! Text output, one block per group:
//!
//! ```text
//! [sources]\engine\render
//!     ${PROJECT_SOURCE_DIR}/engine/render/mesh.cpp
//!     ${PROJECT_SOURCE_DIR}/engine/render/mesh.hpp
//!
//! [third party]\/opt/sdk/include
//!     /opt/sdk/include/sdk.h
//! ```
//!
//! JSON output holds the same groups plus the flat source list:
//!
//! ```json
//! { "groups": [ { "name": "...", "files": ["..."] } ], "sources": ["..."] }
//! ```
//!
use super::config::GenerateConfig;
use crate::core::config::OutputFormat;
use crate::core::error::Result;
use crate::grouping::GroupResult;
use anyhow::Context;
use serde::Serialize;
use std::fmt::Write as FmtWrite;
use std::path::{Component, Path};
use tokio::io::AsyncWriteExt;
use tracing::info;

const FILE_INDENT: &str = "    ";

#[derive(Debug, Serialize)]
struct Report<'a> {
    groups: Vec<GroupResult>,
    sources: &'a [String],
}

/// Rewrites `file` as `${variable}/<relative>` when it lives under `top`.
/// Files outside `top` are returned unchanged.
pub fn display_path(file: &str, top: &str, variable: Option<&str>) -> String {
    let Some(variable) = variable else {
        return file.to_string();
    };
    if top.is_empty() {
        return file.to_string();
    }
    match pathdiff::diff_paths(file, top) {
        Some(relative)
            if !relative.as_os_str().is_empty()
                && !matches!(relative.components().next(), Some(Component::ParentDir)) =>
        {
            format!(
                "${{{}}}/{}",
                variable,
                relative.to_string_lossy().replace('\\', "/")
            )
        }
        _ => file.to_string(),
    }
}

fn display_group(group: &GroupResult, settings: &GenerateConfig) -> GroupResult {
    GroupResult {
        name: group.name.clone(),
        files: group
            .files
            .iter()
            .map(|file| {
                display_path(
                    file,
                    &settings.sources.top,
                    settings.top_variable.as_deref(),
                )
            })
            .collect(),
    }
}

pub fn render_text(groups: &[GroupResult], settings: &GenerateConfig) -> Result<String> {
    let mut output = String::new();
    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            writeln!(output)?;
        }
        let group = display_group(group, settings);
        writeln!(output, "{}", group.name)?;
        for file in &group.files {
            writeln!(output, "{}{}", FILE_INDENT, file)?;
        }
    }
    Ok(output)
}

pub fn render_json(
    groups: &[GroupResult],
    sources: &[String],
    settings: &GenerateConfig,
) -> Result<String> {
    let display_sources: Vec<String> = sources
        .iter()
        .map(|file| {
            display_path(
                file,
                &settings.sources.top,
                settings.top_variable.as_deref(),
            )
        })
        .collect();
    let report = Report {
        groups: groups
            .iter()
            .map(|group| display_group(group, settings))
            .collect(),
        sources: &display_sources,
    };
    let mut json =
        serde_json::to_string_pretty(&report).context("Failed to serialize grouping results")?;
    json.push('\n');
    Ok(json)
}

/// Renders `groups` in the configured format.
pub fn render(
    groups: &[GroupResult],
    sources: &[String],
    settings: &GenerateConfig,
) -> Result<String> {
    match settings.format {
        OutputFormat::Text => render_text(groups, settings),
        OutputFormat::Json => render_json(groups, sources, settings),
    }
}

/// Writes `content` to `path`, creating parent directories as needed, or to
/// stdout when no path is given.
pub async fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            tokio::fs::write(path, content)
                .await
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!("Wrote groups to {}", path.display());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(content.as_bytes())
                .await
                .context("Failed to write to stdout")?;
            stdout.flush().await.context("Failed to flush stdout")?;
        }
    }
    Ok(())
}
