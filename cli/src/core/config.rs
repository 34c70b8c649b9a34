//! # srcgroups Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads the persistent settings of srcgroups: default group
//! names, the default top directory, skip-non-source, and output rendering
//! options. Command-line flags are merged on top of the result by the
//! command handlers.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.srcgroups.toml` in the current directory or ancestors
//! 2. User-specific `<config dir>/srcgroups/config.toml`
//! 3. Default values defined in the code
//!
//! The project search stops at the first directory containing `.git`.
//! Paths are tilde-expanded and the merged configuration is validated before
//! use.
//!
//! ## Examples
//!
//! ```toml
//! [groups]
//! top = "~/work/engine"
//! top_group_name = "[engine]"
//! third_party_group_name = "[third party]"
//! skip_non_source = true
//!
//! [output]
//! format = "json"
//! top_variable = "PROJECT_SOURCE_DIR"
//! ```
//!
use crate::core::error::{GroupsError, Result};
use anyhow::{anyhow, Context};
use clap::ValueEnum;
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub groups: GroupsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings that shape the grouping itself.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GroupsConfig {
    /// Default top directory (can use ~). Will be expanded.
    #[serde(default)]
    pub top: Option<String>,
    /// Label of the group holding files under the top directory.
    #[serde(default = "default_top_group_name")]
    pub top_group_name: String,
    /// Label of the group holding every other file.
    #[serde(default = "default_third_party_group_name")]
    pub third_party_group_name: String,
    /// Drop files that match no source rule instead of grouping them.
    #[serde(default)]
    pub skip_non_source: bool,
}

impl Default for GroupsConfig {
    fn default() -> Self {
        Self {
            top: None,
            top_group_name: default_top_group_name(),
            third_party_group_name: default_third_party_group_name(),
            skip_non_source: false,
        }
    }
}

/// Settings that only affect how results are rendered.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Variable used to render files under the top directory as
    /// `${VAR}/<relative path>`.
    #[serde(default)]
    pub top_variable: Option<String>,
}

/// Rendering of the group list.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Label line followed by indented file lines, one block per group.
    #[default]
    Text,
    /// `{"groups": [...], "sources": [...]}`.
    Json,
}

fn default_top_group_name() -> String {
    "[sources]".to_string()
}
fn default_third_party_group_name() -> String {
    "[third party]".to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".srcgroups.toml";

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "srcgroups") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.is_file() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No {} found in current directory or ancestors.", PROJECT_CONFIG_FILENAME);
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win wherever they differ from the built-in defaults.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();
    let pick = |project: String, user: String, default: &str| {
        if project != default {
            project
        } else {
            user
        }
    };

    Config {
        groups: GroupsConfig {
            top: project.groups.top.or(user.groups.top),
            top_group_name: pick(
                project.groups.top_group_name,
                user.groups.top_group_name,
                &defaults.groups.top_group_name,
            ),
            third_party_group_name: pick(
                project.groups.third_party_group_name,
                user.groups.third_party_group_name,
                &defaults.groups.third_party_group_name,
            ),
            skip_non_source: project.groups.skip_non_source || user.groups.skip_non_source,
        },
        output: OutputConfig {
            format: if project.output.format != defaults.output.format {
                project.output.format
            } else {
                user.output.format
            },
            top_variable: project.output.top_variable.or(user.output.top_variable),
        },
    }
}

fn expand_config_paths(config: &mut Config) {
    if let Some(top) = config.groups.top.as_mut() {
        *top = shellexpand::tilde(top).into_owned();
        debug!("Expanded top directory: {}", top);
    }
}

/// Checks a variable name used in `${VAR}` rendering.
pub fn validate_variable_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(anyhow!(GroupsError::Config(format!(
            "Invalid top variable name '{}'. Use letters, digits and '_' only.",
            name
        ))));
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    if config.groups.top_group_name.trim().is_empty() {
        return Err(anyhow!(GroupsError::Config(
            "top_group_name cannot be empty.".to_string()
        )));
    }
    if config.groups.third_party_group_name.trim().is_empty() {
        return Err(anyhow!(GroupsError::Config(
            "third_party_group_name cannot be empty.".to_string()
        )));
    }
    if let Some(top) = &config.groups.top {
        if top.is_empty() {
            return Err(anyhow!(GroupsError::Config(
                "groups.top cannot be an empty string.".to_string()
            )));
        }
    }
    if let Some(var) = &config.output.top_variable {
        validate_variable_name(var)?;
    }
    debug!("Configuration validation successful.");
    Ok(())
}
