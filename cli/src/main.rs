//! # srcgroups Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the `srcgroups` CLI, which turns a flat list of source
//! paths into IDE source groups (Visual Studio filters, Xcode groups). It
//! handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! srcgroups --help
//!
//! # Group sources listed in a file
//! srcgroups generate --top /work/engine -i sources.txt
//!
//! # Trace every merge/split decision
//! srcgroups -vv generate --top /work/engine -i sources.txt
//! ```
//!
//! Verbosity: `-v` logs at info, `-vv` at debug (and traces the grouping
//! decisions), `-vvv` at trace. `RUST_LOG` overrides the level.
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (generate, classify, tree)
mod core; // Core infrastructure (errors, config)
mod grouping; // Path trees, classification and group generation

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "srcgroups",
    about = "Group source file lists into IDE source groups",
    long_about = "Builds directory-based source groups (with [sugar], [tmpl], [fwd] and [cmake]\n\
                  sub-groups) from a list of paths, for IDE project generators.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Group paths and print the resulting source groups.
    #[command(alias = "g")]
    Generate(commands::generate::GenerateArgs),
    /// Show the bucket of each file name.
    #[command(alias = "c")]
    Classify(commands::classify::ClassifyArgs),
    /// Print the directory trees built from the input.
    #[command(alias = "t")]
    Tree(commands::tree::TreeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let trace_decisions = cli.verbose >= 2;
    let command_result = match cli.command {
        Commands::Generate(args) => {
            commands::generate::handle_generate(args, trace_decisions).await
        }
        Commands::Classify(args) => commands::classify::handle_classify(args).await,
        Commands::Tree(args) => commands::tree::handle_tree(args, trace_decisions).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
