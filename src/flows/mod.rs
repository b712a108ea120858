//! Flows module - Command runners combining parsing, shuffling and rendering
//!
//! Provides:
//! - parse: Show how the raw input splits into items
//! - shuffle: One-shot randomization of a list
//! - session: Interactive, line-oriented randomizer session

pub mod parse;
pub mod session;
pub mod shuffle;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use tokio::runtime::{Builder, Runtime};

/// Resolve the raw input from a file, an argument or stdin (in that order)
pub fn read_raw_input(input: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()));
    }
    if let Some(input) = input {
        return Ok(input);
    }

    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read input from stdin")?;
    Ok(raw)
}

/// Single-threaded runtime; all session work happens on the calling thread
pub fn runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")
}
