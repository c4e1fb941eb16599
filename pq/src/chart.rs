//! Chart specifications
//!
//! A chart spec is plain data describing what to draw. The core only ever
//! picks one of a topic's two specs; turning a spec into widgets is the
//! job of the TUI views.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// A renderable chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    /// Categorical bars
    Bar(BarChartSpec),
    /// One or more x/y series
    Line(LineChartSpec),
}

impl ChartSpec {
    /// Chart title, if the chart has one
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Bar(bar) => bar.title.as_deref(),
            Self::Line(line) => line.title.as_deref(),
        }
    }

    /// Short name of the chart kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bar(_) => "bar",
            Self::Line(_) => "line",
        }
    }
}

/// Bar chart specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartSpec {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub y_label: Option<String>,

    /// Value drawn as the floor of every bar. Anything above zero
    /// exaggerates the differences between bars.
    #[serde(default)]
    pub baseline: f64,

    /// Draw bars left-to-right instead of bottom-to-top
    #[serde(default)]
    pub horizontal: bool,

    /// Print the numeric value next to each bar
    #[serde(default = "default_true")]
    pub show_values: bool,

    pub bars: Vec<BarSpec>,
}

/// A single bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSpec {
    pub label: String,
    pub value: f64,
    #[serde(default)]
    pub color: Option<String>,
}

/// Resolution used when converting bar values to integer heights
const BAR_SCALE: f64 = 100.0;

impl BarChartSpec {
    /// Integer bar heights relative to the baseline
    ///
    /// Values at or below the baseline get height zero.
    pub fn heights(&self) -> Vec<u64> {
        trace!(baseline = self.baseline, bars = self.bars.len(), "BarChartSpec::heights: called");
        self.bars
            .iter()
            .map(|bar| {
                let above = bar.value - self.baseline;
                if above > 0.0 { (above * BAR_SCALE).round() as u64 } else { 0 }
            })
            .collect()
    }

    /// Largest value among the bars
    pub fn max_value(&self) -> Option<f64> {
        self.bars.iter().map(|b| b.value).reduce(f64::max)
    }
}

/// Line chart specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartSpec {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub x_label: Option<String>,

    #[serde(default)]
    pub y_label: Option<String>,

    /// Explicit x-axis range, derived from the data when absent
    #[serde(default)]
    pub x_bounds: Option<[f64; 2]>,

    /// Explicit y-axis range, derived from the data when absent
    #[serde(default)]
    pub y_bounds: Option<[f64; 2]>,

    #[serde(default = "default_true")]
    pub legend: bool,

    pub series: Vec<SeriesSpec>,
}

/// One named series of points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub name: String,

    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub marker: MarkerKind,

    pub points: Vec<[f64; 2]>,
}

/// Point marker used when drawing a series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    #[default]
    Braille,
    Dot,
    Block,
}

impl LineChartSpec {
    /// Effective x-axis bounds
    pub fn x_range(&self) -> [f64; 2] {
        self.x_bounds.unwrap_or_else(|| self.data_range(0))
    }

    /// Effective y-axis bounds
    pub fn y_range(&self) -> [f64; 2] {
        self.y_bounds.unwrap_or_else(|| self.data_range(1))
    }

    fn data_range(&self, axis: usize) -> [f64; 2] {
        trace!(axis, "LineChartSpec::data_range: called");
        let mut values = self.series.iter().flat_map(|s| s.points.iter().map(move |p| p[axis]));
        let Some(first) = values.next() else {
            return [0.0, 1.0];
        };
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if min == max { [min - 1.0, max + 1.0] } else { [min, max] }
    }
}

fn default_true() -> bool {
    true
}
