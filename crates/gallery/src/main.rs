//! Gallery CLI - Content gallery engine.
//!
//! Provides commands for:
//! - `check`: Run the startup sequence and report what would be served
//! - `tree`: Print the assembled navigation tree
//! - `links`: Inspect the merged link registry

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, LinksArgs, TreeArgs};
use output::Output;

/// Gallery - Content gallery engine.
#[derive(Parser)]
#[command(name = "gallery", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the startup sequence and report what would be served.
    Check(CheckArgs),
    /// Print the assembled navigation tree.
    Tree(TreeArgs),
    /// Inspect the merged link registry.
    Links(LinksArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = match &cli.command {
        Commands::Check(args) => args.project.verbose,
        Commands::Tree(args) => args.project.verbose,
        Commands::Links(args) => args.project.verbose,
    };
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = match cli.command {
        Commands::Check(args) => rt.block_on(args.execute()),
        Commands::Tree(args) => rt.block_on(args.execute()),
        Commands::Links(args) => rt.block_on(args.execute()),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
