//! datarandom - Randomize a list of items and view it as a chart
//!
//! datarandom provides:
//! - A comma-separated item parser
//! - A Fisher–Yates shuffle behind an Idle/Busy state machine
//! - Pie, bar and list views in text/jsonl/json/md output
//! - An interactive session with a processing delay and audible cue

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod core;
mod flows;
mod randomizer;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    cli::run(cli)
}

/// Diagnostics go to stderr; RUST_LOG overrides the flag-derived level
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "datarandom=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .without_time(),
        )
        .init();
}
