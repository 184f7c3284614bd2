//! # txwatch-charts
//!
//! D3.js-style chart geometry for the txwatch dashboard.
//! Turns summaries and aggregates into pixel-space glyphs; drawing them is
//! left to the renderer.
//!
//! ## Architecture
//!
//! Uses Strategy pattern for:
//! - Scale computation (linear, band)
//! - Axis label formatting
//!
//! ## Modules
//!
//! - `axis` - Domains, linear/band scales, ticks
//! - `path` - SVG path builders
//! - `boxplot` - Box-plot layout over [`SummaryStats`](txwatch_stats::SummaryStats)
//! - `bars` - Signed bar layout (weekly P&L, importance bars)
//! - `scatter` - Comparison scatter layout

pub mod axis;
pub mod bars;
pub mod boxplot;
pub mod path;
pub mod scatter;

pub use axis::*;
pub use bars::*;
pub use boxplot::*;
pub use path::*;
pub use scatter::*;

// Re-export colors from txwatch-core for convenience
pub use txwatch_core::colors;

use serde::{Deserialize, Serialize};

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Standard chart margins
    pub const fn standard() -> Self {
        Self::new(20.0, 20.0, 30.0, 60.0)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::standard()
    }
}

/// Chart dimensions with margin handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::default(),
        }
    }

    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Inner width (excluding margins)
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Inner height (excluding margins)
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// Pixel range for an x axis inside the plot area
    pub fn x_range(&self) -> (f64, f64) {
        (0.0, self.inner_width())
    }

    /// Pixel range for a y axis inside the plot area (SVG y grows downward)
    pub fn y_range(&self) -> (f64, f64) {
        (self.inner_height(), 0.0)
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(800.0, 400.0)
    }
}
