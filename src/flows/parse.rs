//! Parse flow - Print the item list the randomizer would see

use anyhow::Result;

use crate::core::parse::parse;
use crate::core::render::{RenderConfig, Renderer};

/// Run the parse command
pub fn run_parse(raw: &str, config: RenderConfig) -> Result<()> {
    let items = parse(raw);
    tracing::debug!(items = items.len(), "input parsed");

    let renderer = Renderer::with_config(config);
    let output = renderer.render_items(&items);
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
