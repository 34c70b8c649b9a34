//! # Generate Command
//!
//! File: cli/src/commands/generate/mod.rs
//!
//! ## Overview
//!
//! `srcgroups generate` reads a list of paths, groups them by directory and
//! file kind, and prints the groups (text or JSON) for an IDE project
//! generator to consume.
//!
//! ## Flow
//!
//! 1. Merge CLI arguments with `.srcgroups.toml` (`config`).
//! 2. Collect paths from the list file / stdin and directory scans (`input`).
//! 3. Feed every path to a `Generator` and collect the groups.
//! 4. Render and write the result (`output`).
//!
//! ```bash
//! srcgroups generate --top /work/engine -i sources.txt --top-group-name "[engine]"
//! find /work -name '*.cpp' | srcgroups generate --top /work -i - --format json
//! ```
//!
use crate::core::config as core_config;
use crate::core::error::Result;
use crate::grouping::{GroupResult, Generator};
use anyhow::Context;
use tracing::{debug, info};

pub use config::{GenerateArgs, InputArgs};

pub mod config;
pub mod input;
pub mod output;

/// Builds a generator over `sources` rooted at `top`.
pub fn build_generator(top: &str, sources: &[String], verbose: bool) -> Result<Generator> {
    let mut generator = Generator::new(top, verbose);
    generator
        .extend(sources)
        .context("Failed to group sources")?;
    debug!(
        "Grouped {} distinct file(s) ({} under top)",
        generator.file_count(),
        generator.top().file_count()
    );
    Ok(generator)
}

/// Groups `sources` according to `settings`, returning the groups and the
/// flat source list.
pub fn group_sources(
    sources: &[String],
    settings: &config::GenerateConfig,
) -> Result<(Vec<GroupResult>, Vec<String>)> {
    let generator = build_generator(&settings.sources.top, sources, settings.verbose)?;
    let (groups, flat) = generator.collect(
        &settings.top_group_name,
        &settings.third_party_group_name,
        settings.skip_non_source,
    );

    let dropped = generator.file_count().saturating_sub(flat.len());
    if dropped > 0 {
        info!(
            "Skipped {} file(s) that match no source rule (--skip-non-source)",
            dropped
        );
    }
    Ok((groups, flat))
}

/// # Handle Generate Command (`handle_generate`)
///
/// Entry point for `srcgroups generate`. `verbose` enables tracing of every
/// merge/split decision (logged at debug level).
pub async fn handle_generate(args: GenerateArgs, verbose: bool) -> Result<()> {
    debug!("Handling generate command with args: {:?}", args);

    let file_config = core_config::load_config().context("Failed to load configuration")?;
    let settings = config::GenerateConfig::resolve(args, &file_config, verbose)?;
    info!("Grouping sources with top '{}'", settings.sources.top);

    let sources = input::collect_sources(&settings.sources).await?;
    let (groups, flat) = group_sources(&sources, &settings)?;
    info!("Produced {} group(s)", groups.len());

    let rendered = output::render(&groups, &flat, &settings)?;
    output::write_output(settings.output.as_deref(), &rendered).await
}
