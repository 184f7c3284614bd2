//! # axis
//!
//! Value-to-pixel scales and axis ticks.
//! Implements Strategy pattern for scale behaviors.

use serde::{Deserialize, Serialize};
use txwatch_core::ValueFormatter;

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;

    /// Inverse scale (range to domain)
    fn invert(&self, value: f64) -> f64;

    /// Generate tick values
    fn ticks(&self, count: usize) -> Vec<f64>;
}

// ============================================================================
// DOMAIN
// ============================================================================

/// `a` and `b` are equal up to rounding at their own magnitude
fn is_zero_width(a: f64, b: f64) -> bool {
    (b - a).abs() <= f64::EPSILON * a.abs().max(b.abs())
}

/// Numeric value range being visualized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Tightest domain covering `values`; `None` when empty
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        let (min, max) = values
            .iter()
            .skip(1)
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Some(Self { min, max })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Zero-width domain; mapping through it yields the pixel midpoint
    pub fn is_degenerate(&self) -> bool {
        is_zero_width(self.min, self.max)
    }

    /// Expand both ends by `fraction × span`
    pub fn padded(&self, fraction: f64) -> Self {
        let pad = self.span() * fraction;
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Grow the domain to contain `value`
    pub fn include(&self, value: f64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    /// Smallest domain containing both
    pub fn union(&self, other: &Domain) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl From<(f64, f64)> for Domain {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Options for [`make_linear_scale`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleOptions {
    /// Keep output inside the pixel range
    pub clamp: bool,
    /// Symmetric domain padding as a fraction of its span
    pub pad_fraction: f64,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            clamp: true,
            pad_fraction: 0.0,
        }
    }
}

impl ScaleOptions {
    pub fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn pad_fraction(mut self, fraction: f64) -> Self {
        self.pad_fraction = fraction;
        self
    }
}

/// Linear scale (D3-style continuous scale)
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

/// A value-to-pixel mapping bound to one domain and one pixel range
pub type ScaleFn = LinearScale;

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Get domain bounds
    pub fn domain_bounds(&self) -> Domain {
        Domain::new(self.domain.0, self.domain.1)
    }

    /// Get range bounds
    pub fn range_bounds(&self) -> (f64, f64) {
        self.range
    }

    /// Borrow as a plain closure for APIs that take `Fn(f64) -> f64`
    pub fn as_fn(&self) -> impl Fn(f64) -> f64 + '_ {
        move |value| self.scale(value)
    }

    /// Generate "nice" tick values (rounded to clean numbers)
    pub fn nice_ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        let range = max - min;

        // Inverted and NaN domains get the same treatment as zero-width ones
        if range.is_nan() || range <= 0.0 || count == 0 {
            return vec![min];
        }

        let rough_step = range / count as f64;
        let magnitude = 10.0_f64.powf(rough_step.log10().floor());
        let residual = rough_step / magnitude;

        let nice_step = if residual <= 1.0 {
            magnitude
        } else if residual <= 2.0 {
            2.0 * magnitude
        } else if residual <= 5.0 {
            5.0 * magnitude
        } else {
            10.0 * magnitude
        };

        let first = (min / nice_step).ceil() as i64;
        let last = (max / nice_step).floor() as i64;

        (first..=last).map(|i| i as f64 * nice_step).collect()
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if is_zero_width(d_min, d_max) {
            return (r_min + r_max) / 2.0;
        }

        let normalized = (value - d_min) / (d_max - d_min);
        if !self.clamp {
            return r_min + normalized * (r_max - r_min);
        }

        let pixel = r_min + normalized.clamp(0.0, 1.0) * (r_max - r_min);
        pixel.max(r_min.min(r_max)).min(r_min.max(r_max))
    }

    fn invert(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if is_zero_width(r_min, r_max) {
            return (d_min + d_max) / 2.0;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        d_min + normalized * (d_max - d_min)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        make_ticks(self.domain_bounds(), count)
    }
}

/// Build a linear value-to-pixel mapping.
///
/// The domain is padded by `options.pad_fraction` first. A zero-width
/// domain maps every input to the middle of the pixel range.
pub fn make_linear_scale(domain: Domain, range: (f64, f64), options: ScaleOptions) -> ScaleFn {
    let domain = domain.padded(options.pad_fraction);

    if domain.is_degenerate() {
        tracing::trace!(value = domain.min, "degenerate domain, scale pinned to range midpoint");
    }

    LinearScale::new()
        .domain(domain.min, domain.max)
        .range(range.0, range.1)
        .clamp(options.clamp)
}

/// `count` evenly spaced values from `domain.min` to `domain.max`
/// inclusive. Fewer than two ticks collapses to `[domain.min]`.
pub fn make_ticks(domain: Domain, count: usize) -> Vec<f64> {
    if count < 2 {
        return vec![domain.min];
    }

    let step = domain.span() / (count - 1) as f64;
    let mut ticks: Vec<f64> = (0..count - 1).map(|i| domain.min + step * i as f64).collect();
    ticks.push(domain.max);
    ticks
}

/// A labelled tick at a pixel position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

/// Evenly spaced ticks over the scale's domain, positioned and labelled
pub fn axis_ticks<F: ValueFormatter>(scale: &LinearScale, count: usize, formatter: &F) -> Vec<AxisTick> {
    scale
        .ticks(count)
        .into_iter()
        .map(|value| AxisTick {
            value,
            position: scale.scale(value),
            label: formatter.format(value),
        })
        .collect()
}

// ============================================================================
// BAND SCALE (for categorical data like boxes and bars)
// ============================================================================

/// Band scale for categorical data (box and bar x positions)
#[derive(Debug, Clone)]
pub struct BandScale {
    domain_count: usize,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    pub fn new(count: usize) -> Self {
        Self {
            domain_count: count,
            range: (0.0, 1.0),
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.clamp(0.0, 1.0);
        self
    }

    pub fn padding_uniform(self, padding: f64) -> Self {
        self.padding(padding, padding)
    }

    /// Get step size (band + gap)
    pub fn step(&self) -> f64 {
        if self.domain_count == 0 {
            return 0.0;
        }

        let (r_min, r_max) = self.range;
        let n = self.domain_count as f64;
        let slots = (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        (r_max - r_min) / slots
    }

    /// Get band width (width of each bar/box)
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Get left edge for index
    pub fn scale(&self, index: usize) -> f64 {
        if self.domain_count == 0 {
            return self.range.0;
        }

        let step = self.step();
        self.range.0 + self.padding_outer * step + index as f64 * step
    }

    /// Get center position for index
    pub fn scale_center(&self, index: usize) -> f64 {
        self.scale(index) + self.bandwidth() / 2.0
    }
}

impl Default for BandScale {
    fn default() -> Self {
        Self::new(10)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use txwatch_core::DecimalFormatter;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new()
            .domain(0.0, 100.0)
            .range(0.0, 500.0);

        assert_eq!(scale.scale(0.0), 0.0);
        assert_eq!(scale.scale(50.0), 250.0);
        assert_eq!(scale.scale(100.0), 500.0);
    }

    #[test]
    fn test_linear_scale_invert() {
        let scale = LinearScale::new()
            .domain(0.0, 100.0)
            .range(0.0, 500.0);

        assert_eq!(scale.invert(250.0), 50.0);
    }

    #[test]
    fn test_make_linear_scale_clamps_by_default() {
        let scale = make_linear_scale(Domain::new(0.0, 100.0), (0.0, 200.0), ScaleOptions::default());

        assert_eq!(scale.scale(50.0), 100.0);
        assert_eq!(scale.scale(150.0), 200.0);
        assert_eq!(scale.scale(-10.0), 0.0);

        let f = scale.as_fn();
        assert_eq!(f(25.0), 50.0);
    }

    #[test]
    fn test_unclamped_scale_extrapolates() {
        let options = ScaleOptions::default().clamp(false);
        let scale = make_linear_scale(Domain::new(0.0, 100.0), (0.0, 200.0), options);
        assert_eq!(scale.scale(150.0), 300.0);
    }

    #[test]
    fn test_inverted_range_clamps() {
        // SVG y axis: larger values sit higher (smaller pixel)
        let scale = make_linear_scale(Domain::new(0.0, 10.0), (300.0, 0.0), ScaleOptions::default());
        assert_eq!(scale.scale(0.0), 300.0);
        assert_eq!(scale.scale(10.0), 0.0);
        assert_eq!(scale.scale(20.0), 0.0);
        assert_eq!(scale.scale(-5.0), 300.0);
    }

    #[test]
    fn test_degenerate_domain_maps_to_midpoint() {
        let scale = make_linear_scale(Domain::new(5.0, 5.0), (0.0, 200.0), ScaleOptions::default());
        assert_eq!(scale.scale(5.0), 100.0);
        assert_eq!(scale.scale(-1000.0), 100.0);
        assert_eq!(scale.scale(1e9), 100.0);

        let padded = make_linear_scale(
            Domain::new(5.0, 5.0),
            (0.0, 200.0),
            ScaleOptions::default().pad_fraction(0.1),
        );
        assert_eq!(padded.scale(7.0), 100.0);
    }

    #[test]
    fn test_padding_expands_domain() {
        let options = ScaleOptions::default().pad_fraction(0.1);
        let scale = make_linear_scale(Domain::new(0.0, 100.0), (0.0, 120.0), options);

        assert_eq!(scale.domain_bounds(), Domain::new(-10.0, 110.0));
        assert_eq!(scale.scale(-10.0), 0.0);
        assert_eq!(scale.scale(110.0), 120.0);
    }

    #[test]
    fn test_make_ticks() {
        assert_eq!(
            make_ticks(Domain::new(0.0, 10.0), 6),
            vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]
        );
        assert_eq!(make_ticks(Domain::new(3.0, 9.0), 1), vec![3.0]);
        assert_eq!(make_ticks(Domain::new(3.0, 9.0), 0), vec![3.0]);

        let ticks = make_ticks(Domain::new(0.1, 0.7), 4);
        assert_eq!(ticks.len(), 4);
        assert_eq!(ticks[0], 0.1);
        assert_eq!(ticks[3], 0.7);
    }

    #[test]
    fn test_nice_ticks() {
        let scale = LinearScale::new().domain(0.0, 97.0);
        assert_eq!(scale.nice_ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0]);
    }

    #[test]
    fn test_nice_ticks_on_inverted_domain() {
        let scale = LinearScale::new().domain(10.0, 0.0);
        assert_eq!(scale.nice_ticks(5), vec![10.0]);
    }

    #[test]
    fn test_tiny_domain_is_not_degenerate() {
        let domain = Domain::new(0.0, 1e-17);
        assert!(!domain.is_degenerate());

        let scale = make_linear_scale(domain, (0.0, 200.0), ScaleOptions::default());
        assert_eq!(scale.scale(0.0), 0.0);
        assert_eq!(scale.scale(1e-17), 200.0);

        // Equal up to rounding at large magnitudes still collapses
        assert!(Domain::new(1e6, 1e6 + 1e-10).is_degenerate());
        assert!(Domain::new(0.0, 0.0).is_degenerate());
    }

    #[test]
    fn test_axis_ticks_positions_and_labels() {
        let scale = make_linear_scale(Domain::new(0.0, 10.0), (100.0, 0.0), ScaleOptions::default());
        let ticks = axis_ticks(&scale, 3, &DecimalFormatter { decimals: 1 });

        let labels: Vec<&str> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["0.0", "5.0", "10.0"]);
        assert_eq!(ticks[1].position, 50.0);
    }

    #[test]
    fn test_domain_helpers() {
        let d = Domain::from_values(&[3.0, -1.0, 7.0]).unwrap();
        assert_eq!(d, Domain::new(-1.0, 7.0));
        assert_eq!(d.span(), 8.0);
        assert_eq!(d.include(10.0), Domain::new(-1.0, 10.0));
        assert_eq!(d.union(&Domain::new(-5.0, 0.0)), Domain::new(-5.0, 7.0));
        assert!(Domain::from_values(&[]).is_none());
        assert!(Domain::new(2.0, 2.0).is_degenerate());
    }

    #[test]
    fn test_band_scale() {
        let scale = BandScale::new(5).range(0.0, 100.0);
        let bw = scale.bandwidth();
        assert!(bw > 0.0);
        assert!(bw < 20.0); // Should be less than 100/5

        // Last band ends inside the range, outer padding on both sides
        let last_end = scale.scale(4) + bw;
        assert!(last_end < 100.0);
        assert!((100.0 - last_end - scale.scale(0)).abs() < 1e-9);
        assert_eq!(scale.scale_center(0), scale.scale(0) + bw / 2.0);
    }
}
