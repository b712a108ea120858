//! Presentation model
//!
//! Everything the presentation layer sees is mapped into a [`Snapshot`]
//! before rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::DataRandomError;

/// How the shuffled items are visualized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Pie,
    Bar,
    List,
}

impl ViewMode {
    pub fn title(self) -> &'static str {
        match self {
            ViewMode::Pie => "Pie Chart Visualization",
            ViewMode::Bar => "Bar Chart Visualization",
            ViewMode::List => "List Visualization",
        }
    }
}

impl FromStr for ViewMode {
    type Err = DataRandomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pie" => Ok(ViewMode::Pie),
            "bar" => Ok(ViewMode::Bar),
            "list" => Ok(ViewMode::List),
            _ => Err(DataRandomError::UnknownView(s.to_string())),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewMode::Pie => "pie",
            ViewMode::Bar => "bar",
            ViewMode::List => "list",
        };
        f.write_str(name)
    }
}

/// Animation speed multiplier, forwarded untouched to the renderer.
///
/// 0.5 to 2.0 is the useful range; anything positive and finite is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationSpeed(f64);

impl AnimationSpeed {
    pub const MIN_RECOMMENDED: f64 = 0.5;
    pub const MAX_RECOMMENDED: f64 = 2.0;

    pub fn new(value: f64) -> Result<Self, DataRandomError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(DataRandomError::InvalidSpeed(value.to_string()))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_recommended(self) -> bool {
        (Self::MIN_RECOMMENDED..=Self::MAX_RECOMMENDED).contains(&self.0)
    }

    /// Chart animation duration: one second at speed 1.0
    pub fn animation_ms(self) -> u64 {
        (1000.0 / self.0).round() as u64
    }
}

impl Default for AnimationSpeed {
    fn default() -> Self {
        Self(1.0)
    }
}

impl FromStr for AnimationSpeed {
    type Err = DataRandomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| DataRandomError::InvalidSpeed(s.to_string()))?;
        Self::new(value)
    }
}

/// Chart colours, cycled by position
pub const PALETTE: [&str; 10] = [
    "#00B4FF", "#8A2BE2", "#40E0D0", "#FF6B6B", "#FFD166", "#06D6A0", "#118AB2", "#073B4C",
    "#9381FF", "#B8B8FF",
];

/// One item in the chart data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    /// 1-based position in the shuffled order
    pub rank: usize,
    pub label: String,
    /// Every item carries equal weight
    pub value: u32,
    /// Percentage of the whole
    pub share: f64,
    pub color: String,
}

/// Everything the presentation layer observes at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub view: ViewMode,
    pub speed: AnimationSpeed,
    pub animation_ms: u64,

    /// A shuffle is in flight; `items` still holds the previous result
    pub busy: bool,

    /// Number of published shuffles in this session
    pub count: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    pub items: Vec<Slice>,
}

impl Snapshot {
    pub fn new(
        items: &[String],
        view: ViewMode,
        speed: AnimationSpeed,
        busy: bool,
        count: u64,
        published_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            view,
            speed,
            animation_ms: speed.animation_ms(),
            busy,
            count,
            published_at,
            items: chart_data(items),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|s| s.label.as_str()).collect()
    }
}

/// Convert labels into equally weighted chart slices
pub fn chart_data(items: &[String]) -> Vec<Slice> {
    let share = if items.is_empty() {
        0.0
    } else {
        100.0 / items.len() as f64
    };
    items
        .iter()
        .enumerate()
        .map(|(index, label)| Slice {
            rank: index + 1,
            label: label.clone(),
            value: 1,
            share,
            color: PALETTE[index % PALETTE.len()].to_string(),
        })
        .collect()
}
