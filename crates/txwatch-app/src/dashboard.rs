//! Dashboard assembly: every chart is a thin consumer of the stats engine
//! and the axis scaler.

use serde::Serialize;
use txwatch_charts::{
    BarConfig, BarLayout, BoxPlotConfig, BoxPlotLayout, ScatterConfig, ScatterDatum, ScatterLayout,
};
use txwatch_core::{
    sanitize, CompactNumberFormatter, ObservationProvider, ObservationQuery, ProviderError,
    SignedFormatter, TransactionMetric,
};
use txwatch_stats::{
    aggregate, category_key, observation_week, rank_by_magnitude, summarize_by_key, SummaryStats,
};

/// Label for observations without a timestamp
const UNDATED: &str = "undated";

/// All chart geometry for one dashboard render
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub price_distribution: BoxPlotLayout,
    pub weekly_pnl: BarLayout,
    pub category_performance: BarLayout,
    pub category_comparison: ScatterLayout,
}

/// Fetch everything the dashboard shows and lay it out
pub fn build_dashboard<P: ObservationProvider>(provider: &P) -> Result<Dashboard, ProviderError> {
    let prices = sanitize(provider.fetch_observations(&ObservationQuery::new(TransactionMetric::Price))?);
    let pnl = sanitize(provider.fetch_observations(&ObservationQuery::new(TransactionMetric::Pnl))?);
    let notional = sanitize(provider.fetch_observations(&ObservationQuery::new(TransactionMetric::Notional))?);

    // Price distribution per category
    let price_groups = summarize_by_key(&prices, category_key);
    log_summaries("price", &price_groups);
    let price_distribution = BoxPlotLayout::compute_with(&price_groups, &BoxPlotConfig::default(), &CompactNumberFormatter);

    // Weekly P&L bars, chronological because the provider emits in time order
    let weekly = aggregate(
        &pnl,
        |o| observation_week(o).map_or_else(|| UNDATED.to_string(), |week| week.to_string()),
        |o| o.value,
    );
    let weekly_pnl = BarLayout::from_aggregates(&weekly, &BarConfig::default());

    // Per-category P&L, strongest first
    let per_category = aggregate(&pnl, category_key, |o| o.value);
    let labelled: Vec<(String, f64)> = per_category.iter().map(|r| (r.key.clone(), r.total)).collect();
    let category_performance = BarLayout::compute_with(
        &labelled_ranked(&labelled),
        &BarConfig::default(),
        &SignedFormatter::default(),
    );

    // Mean notional vs mean P&L per category
    let notional_groups = summarize_by_key(&notional, category_key);
    let pnl_groups = summarize_by_key(&pnl, category_key);
    let comparison: Vec<ScatterDatum> = notional_groups
        .iter()
        .filter_map(|(category, n)| {
            pnl_groups
                .iter()
                .find(|(c, _)| c == category)
                .map(|(_, p)| ScatterDatum::new(n.mean, p.mean).with_label(category.clone()))
        })
        .collect();
    let category_comparison = ScatterLayout::compute_with(
        &comparison,
        &ScatterConfig::default(),
        &CompactNumberFormatter,
        &SignedFormatter::default(),
    );

    Ok(Dashboard {
        price_distribution,
        weekly_pnl,
        category_performance,
        category_comparison,
    })
}

fn labelled_ranked(labelled: &[(String, f64)]) -> Vec<(String, f64)> {
    rank_by_magnitude(labelled)
        .into_iter()
        .map(|bar| (bar.label, bar.value))
        .collect()
}

fn log_summaries(metric: &str, groups: &[(String, SummaryStats)]) {
    for (category, stats) in groups {
        tracing::info!(
            metric,
            category = %category,
            n = stats.sample_size,
            min = stats.min,
            q1 = stats.q1,
            median = stats.median,
            q3 = stats.q3,
            max = stats.max,
            outliers = stats.outliers.len(),
            "summary"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use txwatch_core::{InMemoryProvider, MockConfig, MockProvider, Side, Transaction};

    #[test]
    fn test_dashboard_from_mock_provider() {
        let provider = MockProvider::new(MockConfig::default().transaction_count(400));
        let dashboard = build_dashboard(&provider).unwrap();

        assert_eq!(dashboard.price_distribution.boxes.len(), 4);
        assert_eq!(dashboard.category_performance.bars.len(), 4);
        assert_eq!(dashboard.category_comparison.points.len(), 4);
        assert!(!dashboard.weekly_pnl.bars.is_empty());

        // Strongest category first
        let bars = &dashboard.category_performance.bars;
        assert!(bars[0].value.abs() >= bars[1].value.abs());
    }

    #[test]
    fn test_dashboard_from_empty_provider() {
        let provider = InMemoryProvider::new(Vec::new());
        let dashboard = build_dashboard(&provider).unwrap();

        assert!(dashboard.price_distribution.boxes.is_empty());
        assert!(dashboard.weekly_pnl.bars.is_empty());
        assert!(dashboard.category_comparison.points.is_empty());
    }

    #[test]
    fn test_dashboard_serializes() {
        let provider = InMemoryProvider::new(vec![
            Transaction::new("a", "gold", Side::Buy, 2000.0, 1.0).with_pnl(5.0),
            Transaction::new("b", "gold", Side::Sell, 2010.0, 1.0).with_pnl(-2.0),
        ]);
        let dashboard = build_dashboard(&provider).unwrap();
        let json = serde_json::to_value(&dashboard).unwrap();

        assert_eq!(json["price_distribution"]["boxes"][0]["label"], "gold");
        assert_eq!(json["category_performance"]["bars"][0]["value"], 3.0);
    }
}
