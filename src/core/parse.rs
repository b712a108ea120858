//! Item parser
//!
//! Turns the raw comma-separated input into an ordered list of labels.

/// Separator between items in the raw input
pub const DELIMITER: char = ',';

/// Parse raw input into trimmed, non-empty item labels.
///
/// Order of appearance is preserved. Empty, whitespace-only and
/// comma-only inputs yield an empty list.
pub fn parse(raw: &str) -> Vec<String> {
    raw.split(DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
