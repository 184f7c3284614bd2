//! # txwatch-core
//!
//! Core domain types for the txwatch monitoring dashboard.
//! Implements Strategy pattern for value formatting and data sourcing.

pub mod error;
pub mod observation;
pub mod provider;
pub mod transaction;

pub use error::*;
pub use observation::*;
pub use provider::*;
pub use transaction::*;

// ============================================================================
// STRATEGY PATTERN: Formatters
// ============================================================================

/// Strategy trait for rendering a numeric value as an axis or tooltip label
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// Fixed-precision formatter with magnitude-aware decimals
#[derive(Debug, Clone)]
pub struct DecimalFormatter {
    pub decimals: usize,
}

impl Default for DecimalFormatter {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

impl ValueFormatter for DecimalFormatter {
    fn format(&self, value: f64) -> String {
        let abs = value.abs();
        if abs >= 10_000.0 {
            format!("{:.0}", value)
        } else if abs >= 1.0 || abs == 0.0 {
            format!("{:.prec$}", value, prec = self.decimals)
        } else {
            format!("{:.4}", value)
        }
    }
}

/// Compact formatter for large numbers (K, M, B suffixes)
#[derive(Debug, Clone, Default)]
pub struct CompactNumberFormatter;

impl ValueFormatter for CompactNumberFormatter {
    fn format(&self, num: f64) -> String {
        let abs = num.abs();
        let sign = if num < 0.0 { "-" } else { "" };

        if abs >= 1_000_000_000.0 {
            format!("{}{:.2}B", sign, abs / 1_000_000_000.0)
        } else if abs >= 1_000_000.0 {
            format!("{}{:.2}M", sign, abs / 1_000_000.0)
        } else if abs >= 1_000.0 {
            format!("{}{:.2}K", sign, abs / 1_000.0)
        } else {
            format!("{}{:.2}", sign, abs)
        }
    }
}

/// Percentage formatter for ratios (0.25 -> "25.0%")
#[derive(Debug, Clone)]
pub struct PercentFormatter {
    pub decimals: usize,
}

impl Default for PercentFormatter {
    fn default() -> Self {
        Self { decimals: 1 }
    }
}

impl ValueFormatter for PercentFormatter {
    fn format(&self, ratio: f64) -> String {
        format!("{:.prec$}%", ratio * 100.0, prec = self.decimals)
    }
}

/// Signed formatter for P&L style values ("+1.50", "-0.25")
#[derive(Debug, Clone, Default)]
pub struct SignedFormatter {
    pub inner: DecimalFormatter,
}

impl ValueFormatter for SignedFormatter {
    fn format(&self, value: f64) -> String {
        let body = self.inner.format(value.abs());
        if value > 0.0 {
            format!("+{}", body)
        } else if value < 0.0 {
            format!("-{}", body)
        } else {
            body
        }
    }
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const POSITIVE: &str = "#22c55e";
    pub const NEGATIVE: &str = "#ef4444";
    pub const NEUTRAL: &str = "#888888";
    pub const OUTLIER: &str = "#fbbf24";
    pub const BOX_FILL: &str = "#3b82f6";

    /// Fill for a signed value (gains green, losses red, zero grey)
    pub fn for_sign(value: f64) -> &'static str {
        if value > 0.0 {
            POSITIVE
        } else if value < 0.0 {
            NEGATIVE
        } else {
            NEUTRAL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_formatter_strategy() {
        let formatter = DecimalFormatter { decimals: 3 };
        assert_eq!(formatter.format(42.5678), "42.568");
        assert_eq!(formatter.format(0.0), "0.000");
        assert_eq!(formatter.format(25_000.4), "25000");
        assert_eq!(formatter.format(0.12345), "0.1235");
    }

    #[test]
    fn test_compact_formatter() {
        let formatter = CompactNumberFormatter;
        assert_eq!(formatter.format(1_500_000.0), "1.50M");
        assert_eq!(formatter.format(-2_500.0), "-2.50K");
        assert_eq!(formatter.format(500.0), "500.00");
    }

    #[test]
    fn test_percent_and_signed_formatters() {
        assert_eq!(PercentFormatter::default().format(0.25), "25.0%");

        let signed = SignedFormatter::default();
        assert_eq!(signed.format(1.5), "+1.50");
        assert_eq!(signed.format(-0.5), "-0.5000");
        assert_eq!(signed.format(0.0), "0.00");
    }

    #[test]
    fn test_color_for_sign() {
        assert_eq!(colors::for_sign(3.0), colors::POSITIVE);
        assert_eq!(colors::for_sign(-3.0), colors::NEGATIVE);
        assert_eq!(colors::for_sign(0.0), colors::NEUTRAL);
    }
}
