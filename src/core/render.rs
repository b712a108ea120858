//! Renderer module
//!
//! Renders snapshots and item lists to different output formats: text, jsonl, json, md

use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::borrow::Cow;
use std::io::Write;

use crate::core::model::{Slice, Snapshot, ViewMode};
use crate::core::style::hex_rgb;

/// Width of the proportional pie strip, in cells
pub const PIE_WIDTH: usize = 48;

/// Width of a full-length bar, in cells
pub const BAR_WIDTH: usize = 24;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    #[cfg(test)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// A parsed item as emitted by the `parse` command
#[derive(Debug, Clone, Serialize)]
struct ItemRecord<'a> {
    index: usize,
    label: &'a str,
}

/// Renderer for snapshots and item lists
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[cfg(test)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a snapshot to a string
    pub fn render_snapshot(&self, snapshot: &Snapshot) -> String {
        match self.config.format {
            OutputFormat::Text => render_text(snapshot),
            OutputFormat::Jsonl | OutputFormat::Json => self.to_json(snapshot),
            OutputFormat::Markdown => render_markdown(snapshot),
        }
    }

    /// Render a parsed item list to a string
    pub fn render_items(&self, items: &[String]) -> String {
        let records: Vec<ItemRecord<'_>> = items
            .iter()
            .enumerate()
            .map(|(index, label)| ItemRecord { index, label })
            .collect();

        match self.config.format {
            OutputFormat::Text => items
                .iter()
                .map(|item| escape_label(item))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Jsonl => records
                .iter()
                .map(|record| self.to_json(record))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Json => self.to_json(&records),
            OutputFormat::Markdown => items
                .iter()
                .map(|item| format!("- {}", escape_label(item)))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Render a snapshot to a writer, followed by a newline
    pub fn render_snapshot_to<W: Write>(
        &self,
        snapshot: &Snapshot,
        mut writer: W,
    ) -> std::io::Result<()> {
        let output = self.render_snapshot(snapshot);
        writeln!(writer, "{}", output.trim_end_matches('\n'))?;
        if self.config.format == OutputFormat::Text || self.config.format == OutputFormat::Markdown
        {
            // Blank line between consecutive human-readable snapshots
            writeln!(writer)?;
        }
        writer.flush()
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
        } else {
            serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
        }
    }
}

/// Escape control characters so each label stays on one line
fn escape_label(label: &str) -> Cow<'_, str> {
    if !label.chars().any(char::is_control) {
        return Cow::Borrowed(label);
    }
    Cow::Owned(
        label
            .chars()
            .map(|c| {
                if c.is_control() {
                    c.escape_default().to_string()
                } else {
                    c.to_string()
                }
            })
            .collect(),
    )
}

fn paint(text: &str, hex: &str) -> ColoredString {
    match hex_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

fn header(snapshot: &Snapshot) -> String {
    let mut line = snapshot.view.title().bold().to_string();
    if snapshot.count > 0 {
        line.push_str(&format!(" (shuffle #{})", snapshot.count));
    }
    if snapshot.busy {
        line.push_str(&format!("  {}", "Processing...".dimmed()));
    }
    line
}

fn label_width(items: &[Slice]) -> usize {
    items
        .iter()
        .map(|s| escape_label(&s.label).chars().count())
        .max()
        .unwrap_or(0)
}

/// Render as human-readable terminal output
fn render_text(snapshot: &Snapshot) -> String {
    let mut output = header(snapshot);
    output.push('\n');

    if snapshot.is_empty() {
        if !snapshot.busy {
            output.push_str("No Data to Visualize\n");
            output.push_str("Enter some items and randomize to get started\n");
        }
        return output;
    }

    match snapshot.view {
        ViewMode::Pie => render_pie(&mut output, &snapshot.items),
        ViewMode::Bar => render_bar(&mut output, &snapshot.items),
        ViewMode::List => render_list(&mut output, &snapshot.items),
    }
    output
}

fn render_pie(output: &mut String, items: &[Slice]) {
    let n = items.len();
    for (i, slice) in items.iter().enumerate() {
        let cells = (i + 1) * PIE_WIDTH / n - i * PIE_WIDTH / n;
        output.push_str(&paint(&"█".repeat(cells), &slice.color).to_string());
    }
    output.push('\n');

    let width = label_width(items);
    for slice in items {
        output.push_str(&format!(
            "{} {:<width$}  {:>5.1}%\n",
            paint("●", &slice.color),
            escape_label(&slice.label),
            slice.share,
            width = width
        ));
    }
}

fn render_bar(output: &mut String, items: &[Slice]) {
    let max = items.iter().map(|s| s.value).max().unwrap_or(1).max(1) as usize;
    let width = label_width(items);
    for slice in items {
        let cells = slice.value as usize * BAR_WIDTH / max;
        output.push_str(&format!(
            "{:>width$} │{} {}\n",
            escape_label(&slice.label),
            paint(&"█".repeat(cells), &slice.color),
            slice.value,
            width = width
        ));
    }
}

fn render_list(output: &mut String, items: &[Slice]) {
    let width = items.len().to_string().len();
    for slice in items {
        output.push_str(&format!(
            "{:>width$}. {}\n",
            slice.rank,
            escape_label(&slice.label),
            width = width
        ));
    }
}

/// Render as Markdown
fn render_markdown(snapshot: &Snapshot) -> String {
    let mut output = format!("## {}\n\n", snapshot.view.title());

    let mut status = vec![format!("shuffle #{}", snapshot.count)];
    status.push(format!("animation {} ms", snapshot.animation_ms));
    if snapshot.busy {
        status.push("processing".to_string());
    }
    output.push_str(&format!("_{}_\n\n", status.join(" · ")));

    if snapshot.is_empty() {
        output.push_str("> No Data to Visualize\n");
        return output;
    }

    output.push_str("| # | Item | Share |\n");
    output.push_str("|---|------|-------|\n");
    for slice in &snapshot.items {
        output.push_str(&format!(
            "| {} | {} | {:.1}% |\n",
            slice.rank,
            escape_label(&slice.label).replace('|', "\\|"),
            slice.share
        ));
    }
    output
}
