//! Signed bar layout
//!
//! Bars grow up or down from a zero baseline: weekly P&L, per-category
//! performance, correlation and importance bars.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use txwatch_core::{colors, DecimalFormatter, ValueFormatter};
use txwatch_stats::{AggregateRecord, RankedBar};

use crate::{
    axis::{axis_ticks, make_linear_scale, AxisTick, BandScale, Domain, Scale, ScaleOptions},
    path::rect_path,
    ChartDimensions,
};

/// Which aggregate field a bar shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarValue {
    #[default]
    Total,
    Average,
    Count,
}

impl BarValue {
    pub fn pick<K>(&self, record: &AggregateRecord<K>) -> f64 {
        match self {
            Self::Total => record.total,
            Self::Average => record.average,
            Self::Count => record.count as f64,
        }
    }
}

/// Bar chart configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarConfig {
    pub width: f64,
    pub height: f64,
    pub band_padding: f64,
    /// Headroom past the tallest bar, as a fraction of the value span
    pub pad_fraction: f64,
    pub tick_count: usize,
    pub value: BarValue,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 240.0,
            band_padding: 0.2,
            pad_fraction: 0.1,
            tick_count: 5,
            value: BarValue::Total,
        }
    }
}

impl BarConfig {
    pub fn value(mut self, value: BarValue) -> Self {
        self.value = value;
        self
    }
}

/// Pixel geometry for one bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGlyph {
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: &'static str,
    pub path: String,
}

/// Complete bar chart geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarLayout {
    pub dims: ChartDimensions,
    pub y_domain: Domain,
    pub baseline_y: f64,
    pub y_ticks: Vec<AxisTick>,
    pub bars: Vec<BarGlyph>,
}

impl BarLayout {
    /// One bar per aggregate record, in record order
    pub fn from_aggregates<K: Display>(records: &[AggregateRecord<K>], config: &BarConfig) -> Self {
        let labelled: Vec<(String, f64)> = records
            .iter()
            .map(|r| (r.key.to_string(), config.value.pick(r)))
            .collect();
        Self::compute(&labelled, config)
    }

    /// One bar per ranked entry, height from its normalized share
    pub fn from_ranked(ranked: &[RankedBar], config: &BarConfig) -> Self {
        let labelled: Vec<(String, f64)> = ranked.iter().map(|b| (b.label.clone(), b.share)).collect();
        Self::compute(&labelled, config)
    }

    pub fn compute(labelled: &[(String, f64)], config: &BarConfig) -> Self {
        Self::compute_with(labelled, config, &DecimalFormatter::default())
    }

    /// Lay out labelled values. The y domain always contains zero; padding
    /// is only added on sides that hold data.
    pub fn compute_with<F: ValueFormatter>(
        labelled: &[(String, f64)],
        config: &BarConfig,
        formatter: &F,
    ) -> Self {
        let dims = ChartDimensions::new(config.width, config.height);

        let values: Vec<f64> = labelled.iter().map(|(_, v)| *v).collect();
        let raw = Domain::from_values(&values)
            .map(|d| d.include(0.0))
            .unwrap_or_default();
        let padded = raw.padded(config.pad_fraction);
        let y_domain = Domain::new(
            if raw.min < 0.0 { padded.min } else { raw.min },
            if raw.max > 0.0 { padded.max } else { raw.max },
        );

        let y_scale = make_linear_scale(y_domain, dims.y_range(), ScaleOptions::default());
        let y_ticks = axis_ticks(&y_scale, config.tick_count, formatter);
        let baseline_y = y_scale.scale(0.0);

        let (x_min, x_max) = dims.x_range();
        let x_scale = BandScale::new(labelled.len())
            .range(x_min, x_max)
            .padding_uniform(config.band_padding);
        let width = x_scale.bandwidth();

        let bars = labelled
            .iter()
            .enumerate()
            .map(|(i, (label, value))| {
                let x = x_scale.scale(i);
                let top = y_scale.scale(*value);
                let y = top.min(baseline_y);
                let height = (top - baseline_y).abs();

                BarGlyph {
                    label: label.clone(),
                    value: *value,
                    x,
                    y,
                    width,
                    height,
                    fill: colors::for_sign(*value),
                    path: rect_path(x, y, width, height),
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(bars = bars.len(), baseline_y, "bar chart laid out");

        Self {
            dims,
            y_domain,
            baseline_y,
            y_ticks,
            bars,
        }
    }
}
