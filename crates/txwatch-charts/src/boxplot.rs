//! Box plot layout
//!
//! One box per labelled [`SummaryStats`], all sharing a y axis padded
//! around the full value range (outliers included).

use serde::{Deserialize, Serialize};
use txwatch_core::{DecimalFormatter, ValueFormatter};
use txwatch_stats::SummaryStats;

use crate::{
    axis::{axis_ticks, make_linear_scale, AxisTick, BandScale, Domain, Scale, ScaleOptions},
    colors,
    path::PathBuilder,
    ChartDimensions,
};

/// Box plot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxPlotConfig {
    pub width: f64,
    pub height: f64,
    /// Y domain padding as a fraction of the value span
    pub pad_fraction: f64,
    /// Gap between boxes as a fraction of the band step
    pub band_padding: f64,
    pub tick_count: usize,
    pub show_outliers: bool,
    pub outlier_radius: f64,
}

impl Default for BoxPlotConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 320.0,
            pad_fraction: 0.1,
            band_padding: 0.3,
            tick_count: 5,
            show_outliers: true,
            outlier_radius: 3.0,
        }
    }
}

/// An outlier dot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierPoint {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub value: f64,
    pub fill: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Pixel geometry for one box
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxGlyph {
    pub label: String,
    /// Left edge of the box
    pub x: f64,
    pub width: f64,
    pub center_x: f64,
    /// Q3 in pixels
    pub box_top: f64,
    /// Q1 in pixels
    pub box_bottom: f64,
    pub median_y: f64,
    pub mean_y: f64,
    /// Upper whisker end (max) in pixels
    pub whisker_top: f64,
    /// Lower whisker end (min) in pixels
    pub whisker_bottom: f64,
    pub whisker_path: String,
    pub outliers: Vec<OutlierPoint>,
    pub fill: &'static str,
    pub stats: SummaryStats,
}

impl BoxGlyph {
    pub fn box_height(&self) -> f64 {
        (self.box_bottom - self.box_top).abs()
    }
}

/// Complete box plot geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotLayout {
    pub dims: ChartDimensions,
    pub y_domain: Domain,
    pub y_ticks: Vec<AxisTick>,
    pub boxes: Vec<BoxGlyph>,
}

impl BoxPlotLayout {
    /// Lay out with default decimal tick labels
    pub fn compute(groups: &[(String, SummaryStats)], config: &BoxPlotConfig) -> Self {
        Self::compute_with(groups, config, &DecimalFormatter::default())
    }

    /// Lay out with a caller-chosen tick label formatter.
    ///
    /// Empty summaries are skipped; they carry no values to draw.
    pub fn compute_with<F: ValueFormatter>(
        groups: &[(String, SummaryStats)],
        config: &BoxPlotConfig,
        formatter: &F,
    ) -> Self {
        let dims = ChartDimensions::new(config.width, config.height);

        let visible: Vec<&(String, SummaryStats)> =
            groups.iter().filter(|(_, stats)| !stats.is_empty()).collect();
        if visible.len() < groups.len() {
            tracing::debug!(skipped = groups.len() - visible.len(), "skipping empty box plot groups");
        }

        let value_domain = visible
            .iter()
            .map(|(_, stats)| {
                let (lo, hi) = if config.show_outliers {
                    stats.full_range()
                } else {
                    stats.whisker_range()
                };
                Domain::new(lo, hi)
            })
            .reduce(|acc, d| acc.union(&d))
            .unwrap_or_default();

        let y_scale = make_linear_scale(
            value_domain,
            dims.y_range(),
            ScaleOptions::default().pad_fraction(config.pad_fraction),
        );
        let y_domain = y_scale.domain_bounds();
        let y_ticks = axis_ticks(&y_scale, config.tick_count, formatter);

        let (x_min, x_max) = dims.x_range();
        let x_scale = BandScale::new(visible.len())
            .range(x_min, x_max)
            .padding_uniform(config.band_padding);
        let width = x_scale.bandwidth();

        let boxes = visible
            .iter()
            .enumerate()
            .map(|(i, (label, stats))| {
                let x = x_scale.scale(i);
                let center_x = x_scale.scale_center(i);

                let box_top = y_scale.scale(stats.q3);
                let box_bottom = y_scale.scale(stats.q1);
                let whisker_top = y_scale.scale(stats.max);
                let whisker_bottom = y_scale.scale(stats.min);

                let cap_left = center_x - width / 4.0;
                let cap_right = center_x + width / 4.0;
                let whisker_path = PathBuilder::new()
                    .move_to(center_x, whisker_bottom)
                    .vertical_to(box_bottom)
                    .move_to(center_x, box_top)
                    .vertical_to(whisker_top)
                    .move_to(cap_left, whisker_top)
                    .horizontal_to(cap_right)
                    .move_to(cap_left, whisker_bottom)
                    .horizontal_to(cap_right)
                    .build();

                let outliers = if config.show_outliers {
                    stats
                        .outliers
                        .iter()
                        .map(|o| OutlierPoint {
                            cx: center_x,
                            cy: y_scale.scale(o.value),
                            r: config.outlier_radius,
                            value: o.value,
                            fill: colors::OUTLIER,
                            id: o.id.clone(),
                        })
                        .collect()
                } else {
                    Vec::new()
                };

                BoxGlyph {
                    label: label.clone(),
                    x,
                    width,
                    center_x,
                    box_top,
                    box_bottom,
                    median_y: y_scale.scale(stats.median),
                    mean_y: y_scale.scale(stats.mean),
                    whisker_top,
                    whisker_bottom,
                    whisker_path,
                    outliers,
                    fill: colors::BOX_FILL,
                    stats: stats.clone(),
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(boxes = boxes.len(), y_min = y_domain.min, y_max = y_domain.max, "box plot laid out");

        Self {
            dims,
            y_domain,
            y_ticks,
            boxes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use txwatch_stats::compute_summary_values;

    fn groups() -> Vec<(String, SummaryStats)> {
        vec![
            ("gold".to_string(), compute_summary_values(&[10.0, 12.0, 11.0, 13.0, 12.0, 11.0, 100.0])),
            ("silver".to_string(), compute_summary_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0])),
        ]
    }

    #[test]
    fn test_boxes_ordered_top_to_bottom() {
        let layout = BoxPlotLayout::compute(&groups(), &BoxPlotConfig::default());
        assert_eq!(layout.boxes.len(), 2);

        for glyph in &layout.boxes {
            // Smaller pixel y is higher on screen
            assert!(glyph.whisker_top <= glyph.box_top);
            assert!(glyph.box_top <= glyph.median_y);
            assert!(glyph.median_y <= glyph.box_bottom);
            assert!(glyph.box_bottom <= glyph.whisker_bottom);
            assert!(glyph.box_height() >= 0.0);
            assert!(glyph.whisker_path.starts_with('M'));
        }

        assert!(layout.boxes[0].x < layout.boxes[1].x);
    }

    #[test]
    fn test_shared_domain_is_padded_around_outliers() {
        let layout = BoxPlotLayout::compute(&groups(), &BoxPlotConfig::default());

        // Full range is [1, 100], padded by 10% of 99
        assert!((layout.y_domain.min - (1.0 - 9.9)).abs() < 1e-9);
        assert!((layout.y_domain.max - (100.0 + 9.9)).abs() < 1e-9);

        let gold = &layout.boxes[0];
        assert_eq!(gold.outliers.len(), 1);
        assert_eq!(gold.outliers[0].value, 100.0);
        assert_eq!(gold.outliers[0].fill, colors::OUTLIER);
        assert_eq!(gold.outliers[0].cx, gold.center_x);
        assert!(gold.outliers[0].cy < gold.whisker_top);

        assert_eq!(layout.y_ticks.len(), 5);
        assert_eq!(layout.y_ticks[0].position, layout.dims.inner_height());
        assert_eq!(layout.y_ticks[4].position, 0.0);
    }

    #[test]
    fn test_hidden_outliers_shrink_domain() {
        let config = BoxPlotConfig {
            show_outliers: false,
            pad_fraction: 0.0,
            ..Default::default()
        };
        let layout = BoxPlotLayout::compute(&groups(), &config);

        assert_eq!(layout.y_domain, Domain::new(1.0, 13.0));
        assert!(layout.boxes[0].outliers.is_empty());
    }

    #[test]
    fn test_empty_groups_are_skipped() {
        let mut input = groups();
        input.push(("empty".to_string(), SummaryStats::default()));

        let layout = BoxPlotLayout::compute(&input, &BoxPlotConfig::default());
        assert_eq!(layout.boxes.len(), 2);

        let none = BoxPlotLayout::compute(&[], &BoxPlotConfig::default());
        assert!(none.boxes.is_empty());
        assert_eq!(none.y_ticks.len(), 5);
    }

    #[test]
    fn test_single_value_box_sits_mid_chart() {
        let input = vec![("flat".to_string(), compute_summary_values(&[5.0, 5.0, 5.0]))];
        let layout = BoxPlotLayout::compute(&input, &BoxPlotConfig::default());

        let mid = layout.dims.inner_height() / 2.0;
        assert_eq!(layout.boxes[0].median_y, mid);
        assert_eq!(layout.boxes[0].box_height(), 0.0);
    }
}
