//! Terminal colour setup
//!
//! Colour handling is process-wide state. It is decided once, on the first
//! call to [`ensure_styles`], and reused after that.

use once_cell::sync::OnceCell;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleMode {
    Color,
    Plain,
}

static STYLE_MODE: OnceCell<StyleMode> = OnceCell::new();

/// Initialize terminal styling once; later calls return the first decision.
pub fn ensure_styles(no_color: bool) -> StyleMode {
    *STYLE_MODE.get_or_init(|| {
        let mode = if no_color
            || std::env::var_os("NO_COLOR").is_some()
            || !std::io::stdout().is_terminal()
        {
            StyleMode::Plain
        } else {
            StyleMode::Color
        };
        colored::control::set_override(mode == StyleMode::Color);
        tracing::debug!(?mode, "terminal styles initialized");
        mode
    })
}

/// Parse a `#RRGGBB` colour
pub fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
