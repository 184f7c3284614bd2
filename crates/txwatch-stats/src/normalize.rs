//! Magnitude normalization for correlation and feature-importance bars

use serde::{Deserialize, Serialize};

/// Divide every value by the largest absolute value, so bars land in
/// `[-1, 1]` while keeping their sign. All-zero (or empty) input maps to
/// zeros.
pub fn normalize_magnitudes(values: &[f64]) -> Vec<f64> {
    let peak = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if peak == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / peak).collect()
}

/// A labelled bar with its share of the strongest bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedBar {
    pub label: String,
    pub value: f64,
    /// `value / max|value|`, in `[-1, 1]`
    pub share: f64,
}

/// Sort labelled values by descending magnitude and attach normalized
/// shares. Ties keep input order.
pub fn rank_by_magnitude(labelled: &[(String, f64)]) -> Vec<RankedBar> {
    let values: Vec<f64> = labelled.iter().map(|(_, v)| *v).collect();
    let shares = normalize_magnitudes(&values);

    let mut bars: Vec<RankedBar> = labelled
        .iter()
        .zip(shares)
        .map(|((label, value), share)| RankedBar {
            label: label.clone(),
            value: *value,
            share,
        })
        .collect();

    bars.sort_by(|a, b| b.value.abs().total_cmp(&a.value.abs()));
    bars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_sign() {
        assert_eq!(normalize_magnitudes(&[0.5, -1.0, 0.25]), vec![0.5, -1.0, 0.25]);
        assert_eq!(normalize_magnitudes(&[2.0, 4.0]), vec![0.5, 1.0]);
    }

    #[test]
    fn test_normalize_all_zero() {
        assert_eq!(normalize_magnitudes(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert!(normalize_magnitudes(&[]).is_empty());
    }

    #[test]
    fn test_rank_by_magnitude() {
        let input = vec![
            ("volume".to_string(), 0.2),
            ("velocity".to_string(), -0.8),
            ("amount".to_string(), 0.4),
        ];
        let ranked = rank_by_magnitude(&input);

        let labels: Vec<&str> = ranked.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["velocity", "amount", "volume"]);
        assert_eq!(ranked[0].share, -1.0);
        assert_eq!(ranked[1].share, 0.5);
    }
}
