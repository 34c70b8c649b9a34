//! # Classify Command
//!
//! File: cli/src/commands/classify.rs
//!
//! ## Overview
//!
//! `srcgroups classify` reports the bucket each name falls into, which is
//! handy when checking why a file landed in a `[tmpl]` or `[cmake]` group.
//! Paths are accepted; only the final component is classified.
//!
//! ```bash
//! $ srcgroups classify vector.tpp CMakeLists.txt notes.txt --skip-non-source
//! vector.tpp	template
//! CMakeLists.txt	build-meta
//! notes.txt	-
//! ```
//!
use crate::core::error::Result;
use crate::grouping::Classifier;
use clap::Parser;
use tracing::debug;

/// # Classify Command Arguments (`ClassifyArgs`)
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// File names or paths to classify.
    #[arg(required = true, num_args = 1..)]
    pub names: Vec<String>,

    /// Report unknown non-source files as skipped ('-').
    #[arg(long)]
    pub skip_non_source: bool,
}

/// Formats one `name<TAB>bucket` line; `-` marks a skipped file.
fn classify_line(classifier: &Classifier, name: &str) -> String {
    let filename = name.rsplit('/').next().unwrap_or(name);
    match classifier.classify(filename) {
        Some(bucket) => format!("{}\t{}", name, bucket),
        None => format!("{}\t-", name),
    }
}

pub async fn handle_classify(args: ClassifyArgs) -> Result<()> {
    debug!("Handling classify command with args: {:?}", args);
    let classifier = Classifier::new(args.skip_non_source);
    debug!(
        "Classifying {} name(s) (skip non-source: {})",
        args.names.len(),
        classifier.skip_non_source()
    );
    for name in &args.names {
        println!("{}", classify_line(&classifier, name));
    }
    Ok(())
}
