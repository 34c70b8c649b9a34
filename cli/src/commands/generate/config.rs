//! # Generate Command Configuration
//!
//! File: cli/src/commands/generate/config.rs
//!
//! ## Overview
//!
//! Defines the arguments of `srcgroups generate` and merges them with the
//! persistent configuration into a single `GenerateConfig`:
//! 1. Command-line arguments (highest priority)
//! 2. `.srcgroups.toml` / user config (see `core::config`)
//! 3. Default values (lowest priority)
//!
//! `InputArgs` is shared with `srcgroups tree`, which reads the same inputs.
//!
use crate::core::config::{self, Config, OutputFormat};
use crate::core::error::{GroupsError, Result};
use anyhow::anyhow;
use clap::{Args, Parser};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the paths to group come from.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Top directory of the project sources. Files outside it are grouped as
    /// third party. Falls back to `groups.top` from the configuration.
    #[arg(long, env = "SRCGROUPS_TOP")]
    pub top: Option<String>,

    /// File listing the paths to group, separated by ';' or newlines.
    /// Use '-' to read the list from standard input.
    #[arg(long, short, required_unless_present = "scan")]
    pub input: Option<PathBuf>,

    /// Directory to scan recursively for files (hidden entries are skipped).
    /// May be repeated and combined with --input.
    #[arg(long)]
    pub scan: Vec<PathBuf>,
}

/// # Generate Command Arguments (`GenerateArgs`)
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file. Results are written to stdout when omitted.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Label of the group holding files under --top (e.g. "[engine]").
    #[arg(long)]
    pub top_group_name: Option<String>,

    /// Label of the group holding every other file.
    #[arg(long)]
    pub third_party_group_name: Option<String>,

    /// Render files under --top as `${VAR}/<relative path>`
    /// (e.g. PROJECT_SOURCE_DIR).
    #[arg(long)]
    pub top_variable: Option<String>,

    /// Skip files with unknown non-source extensions (.txt, .html, .png, ...).
    #[arg(long)]
    pub skip_non_source: bool,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Input settings after merging arguments with the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct InputSources {
    /// Top directory without trailing '/'.
    pub top: String,
    pub input: Option<PathBuf>,
    pub scan: Vec<PathBuf>,
}

impl InputSources {
    pub fn resolve(args: InputArgs, cfg: &Config) -> Result<Self> {
        let top = args
            .top
            .or_else(|| cfg.groups.top.clone())
            .ok_or_else(|| {
                anyhow!(GroupsError::ArgumentParsing(
                    "--top is required (or set groups.top in .srcgroups.toml)".to_string()
                ))
            })?;

        let top = normalize_top(&top, !args.scan.is_empty());
        Ok(Self {
            top,
            input: args.input,
            scan: args.scan,
        })
    }
}

/// Brings `top` into the form scanned paths use: absolute, symlinks
/// resolved, forward slashes. Applied when `top` is relative or directories
/// are scanned, and only if `top` exists. Trailing `/` is always dropped.
fn normalize_top(top: &str, scanning: bool) -> String {
    let path = Path::new(top);
    if scanning || path.is_relative() {
        match path.canonicalize() {
            Ok(canonical) => {
                let normalized = canonical.to_string_lossy().replace('\\', "/");
                debug!("Normalized top '{}' to '{}'", top, normalized);
                return normalized.trim_end_matches('/').to_string();
            }
            Err(e) => debug!("Keeping top '{}' as given: {}", top, e),
        }
    }
    top.trim_end_matches('/').to_string()
}

/// # Effective Generate Configuration (`GenerateConfig`)
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateConfig {
    pub sources: InputSources,
    pub output: Option<PathBuf>,
    pub top_group_name: String,
    pub third_party_group_name: String,
    pub top_variable: Option<String>,
    pub skip_non_source: bool,
    pub format: OutputFormat,
    /// Trace every merge/split decision of the trees.
    pub verbose: bool,
}

impl GenerateConfig {
    /// Merges `args` over `cfg`. Flags given on the command line always win.
    pub fn resolve(args: GenerateArgs, cfg: &Config, verbose: bool) -> Result<Self> {
        let top_variable = args
            .top_variable
            .or_else(|| cfg.output.top_variable.clone());
        if let Some(var) = &top_variable {
            config::validate_variable_name(var)?;
        }

        let resolved = Self {
            sources: InputSources::resolve(args.input, cfg)?,
            output: args.output,
            top_group_name: args
                .top_group_name
                .unwrap_or_else(|| cfg.groups.top_group_name.clone()),
            third_party_group_name: args
                .third_party_group_name
                .unwrap_or_else(|| cfg.groups.third_party_group_name.clone()),
            top_variable,
            skip_non_source: args.skip_non_source || cfg.groups.skip_non_source,
            format: args.format.unwrap_or(cfg.output.format),
            verbose,
        };
        debug!("Resolved generate configuration: {:?}", resolved);
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{GroupsConfig, OutputConfig};

    fn parse(args: &[&str]) -> GenerateArgs {
        GenerateArgs::try_parse_from(std::iter::once("generate").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_requires_input_or_scan() {
        assert!(GenerateArgs::try_parse_from(["generate", "--top", "/top"]).is_err());
        assert!(GenerateArgs::try_parse_from(["generate", "--scan", "src"]).is_ok());
        assert!(GenerateArgs::try_parse_from(["generate", "-i", "files.txt"]).is_ok());
    }

    #[test]
    fn test_defaults_come_from_config() {
        let cfg = Config::default();
        let resolved =
            GenerateConfig::resolve(parse(&["--top", "/top/", "-i", "list.txt"]), &cfg, false)
                .unwrap();

        assert_eq!(resolved.sources.top, "/top");
        assert_eq!(resolved.sources.input, Some(PathBuf::from("list.txt")));
        assert_eq!(resolved.top_group_name, "[sources]");
        assert_eq!(resolved.third_party_group_name, "[third party]");
        assert_eq!(resolved.format, OutputFormat::Text);
        assert!(!resolved.skip_non_source);
        assert!(resolved.top_variable.is_none());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cfg = Config {
            groups: GroupsConfig {
                top: Some("/from/config".into()),
                top_group_name: "[cfg]".into(),
                ..Default::default()
            },
            output: OutputConfig {
                format: OutputFormat::Json,
                top_variable: Some("CFG_ROOT".into()),
            },
        };
        let args = parse(&[
            "--top",
            "/from/cli",
            "-i",
            "-",
            "--top-group-name",
            "[cli]",
            "--top-variable",
            "CLI_ROOT",
            "--format",
            "text",
            "--skip-non-source",
        ]);

        let resolved = GenerateConfig::resolve(args, &cfg, true).unwrap();
        assert_eq!(resolved.sources.top, "/from/cli");
        assert_eq!(resolved.top_group_name, "[cli]");
        assert_eq!(resolved.top_variable.as_deref(), Some("CLI_ROOT"));
        assert_eq!(resolved.format, OutputFormat::Text);
        assert!(resolved.skip_non_source);
        assert!(resolved.verbose);
    }

    #[test]
    fn test_top_falls_back_to_config() {
        let cfg = Config {
            groups: GroupsConfig {
                top: Some("/from/config".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = GenerateConfig::resolve(parse(&["-i", "x"]), &cfg, false).unwrap();
        assert_eq!(resolved.sources.top, "/from/config");
    }

    #[test]
    fn test_missing_top_is_an_error() {
        let err = GenerateConfig::resolve(parse(&["-i", "x"]), &Config::default(), false)
            .unwrap_err();
        assert!(err.to_string().contains("--top is required"));
    }

    #[test]
    fn test_top_is_left_alone_without_scan() {
        let resolved = InputSources::resolve(
            InputArgs {
                top: Some("/does/not/exist/".into()),
                input: Some(PathBuf::from("list.txt")),
                scan: Vec::new(),
            },
            &Config::default(),
        )
        .unwrap();
        assert_eq!(resolved.top, "/does/not/exist");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_top_matches_scanned_paths() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let real = temp_dir.path().join("real");
        std::fs::create_dir_all(real.join("src"))?;
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link)?;

        let resolved = InputSources::resolve(
            InputArgs {
                top: Some(format!("{}/", link.display())),
                input: None,
                scan: vec![link.join("src")],
            },
            &Config::default(),
        )?;
        let expected = real.canonicalize()?.to_string_lossy().replace('\\', "/");
        assert_eq!(resolved.top, expected);
        Ok(())
    }

    #[test]
    fn test_invalid_top_variable_is_rejected() {
        let args = parse(&["--top", "/t", "-i", "x", "--top-variable", "${X}"]);
        assert!(GenerateConfig::resolve(args, &Config::default(), false).is_err());
    }
}
