//! Comparison scatter layout
//!
//! Both axes get their own domain, each padded by the same fraction so
//! points never sit on the plot border.

use serde::{Deserialize, Serialize};
use txwatch_core::{DecimalFormatter, ValueFormatter};

use crate::{
    axis::{axis_ticks, make_linear_scale, AxisTick, Domain, Scale, ScaleOptions},
    colors,
    path::line_path,
    ChartDimensions,
};

/// One input point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterDatum {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ScatterDatum {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, label: None }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl From<(f64, f64)> for ScatterDatum {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Scatter chart configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterConfig {
    pub width: f64,
    pub height: f64,
    pub pad_fraction: f64,
    pub tick_count: usize,
    pub point_radius: f64,
    /// Connect points in x order
    pub show_trend: bool,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 320.0,
            pad_fraction: 0.1,
            tick_count: 5,
            point_radius: 4.0,
            show_trend: false,
        }
    }
}

/// A plotted point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub datum: ScatterDatum,
    pub fill: &'static str,
}

/// Complete scatter geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterLayout {
    pub dims: ChartDimensions,
    pub x_domain: Domain,
    pub y_domain: Domain,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
    pub points: Vec<ScatterPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_path: Option<String>,
}

impl ScatterLayout {
    pub fn compute(data: &[ScatterDatum], config: &ScatterConfig) -> Self {
        let formatter = DecimalFormatter::default();
        Self::compute_with(data, config, &formatter, &formatter)
    }

    pub fn compute_with<FX: ValueFormatter, FY: ValueFormatter>(
        data: &[ScatterDatum],
        config: &ScatterConfig,
        x_formatter: &FX,
        y_formatter: &FY,
    ) -> Self {
        let dims = ChartDimensions::new(config.width, config.height);
        let options = ScaleOptions::default().pad_fraction(config.pad_fraction);

        let xs: Vec<f64> = data.iter().map(|d| d.x).collect();
        let ys: Vec<f64> = data.iter().map(|d| d.y).collect();

        let x_scale = make_linear_scale(Domain::from_values(&xs).unwrap_or_default(), dims.x_range(), options);
        let y_scale = make_linear_scale(Domain::from_values(&ys).unwrap_or_default(), dims.y_range(), options);

        let points: Vec<ScatterPoint> = data
            .iter()
            .map(|datum| ScatterPoint {
                cx: x_scale.scale(datum.x),
                cy: y_scale.scale(datum.y),
                r: config.point_radius,
                datum: datum.clone(),
                fill: colors::for_sign(datum.y),
            })
            .collect();

        let trend_path = (config.show_trend && points.len() > 1).then(|| {
            let mut ordered: Vec<(f64, f64)> = points.iter().map(|p| (p.cx, p.cy)).collect();
            ordered.sort_by(|a, b| a.0.total_cmp(&b.0));
            line_path(&ordered)
        });

        tracing::debug!(points = points.len(), "scatter laid out");

        Self {
            dims,
            x_domain: x_scale.domain_bounds(),
            y_domain: y_scale.domain_bounds(),
            x_ticks: axis_ticks(&x_scale, config.tick_count, x_formatter),
            y_ticks: axis_ticks(&y_scale, config.tick_count, y_formatter),
            points,
            trend_path,
        }
    }
}
