//! Grouping and per-group aggregation

use std::hash::Hash;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use txwatch_core::Observation;

use crate::{compute_summary, SummaryStats};

/// Label used when an observation has no category
pub const UNCATEGORIZED: &str = "uncategorized";

/// Bucket items by key. Keys keep first-seen order; items keep input order
/// within a bucket.
pub fn group_by_key<T, K, F>(items: &[T], key_fn: F) -> IndexMap<K, Vec<T>>
where
    T: Clone,
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
    for item in items {
        groups.entry(key_fn(item)).or_default().push(item.clone());
    }
    groups
}

/// Totals for one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord<K> {
    pub key: K,
    pub total: f64,
    pub count: usize,
    pub average: f64,
}

impl<K> AggregateRecord<K> {
    fn from_values(key: K, values: impl Iterator<Item = f64>) -> Self {
        let (total, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
        let average = if count == 0 { 0.0 } else { total / count as f64 };
        Self {
            key,
            total,
            count,
            average,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.total > 0.0
    }
}

/// One [`AggregateRecord`] per group, in first-seen key order. Callers sort
/// the result themselves when they need another order.
pub fn aggregate<T, K, F, V>(items: &[T], key_fn: F, value_fn: V) -> Vec<AggregateRecord<K>>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
    V: Fn(&T) -> f64,
{
    let mut groups: IndexMap<K, Vec<f64>> = IndexMap::new();
    for item in items {
        groups.entry(key_fn(item)).or_default().push(value_fn(item));
    }

    let records: Vec<AggregateRecord<K>> = groups
        .into_iter()
        .map(|(key, values)| AggregateRecord::from_values(key, values.into_iter()))
        .collect();

    tracing::debug!(groups = records.len(), items = items.len(), "aggregated");
    records
}

/// Group observations and summarize each bucket (one box per category, day, ...)
pub fn summarize_by_key<K, F>(observations: &[Observation], key_fn: F) -> Vec<(K, SummaryStats)>
where
    K: Hash + Eq,
    F: Fn(&Observation) -> K,
{
    group_by_key(observations, key_fn)
        .into_iter()
        .map(|(key, bucket)| {
            let stats = compute_summary(&bucket);
            (key, stats)
        })
        .collect()
}

// ============================================================================
// KEY FUNCTIONS
// ============================================================================

/// Calendar day (UTC)
pub fn day_key(timestamp: &DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}

/// Monday of the ISO week containing `timestamp` (UTC)
pub fn week_key(timestamp: &DateTime<Utc>) -> NaiveDate {
    let date = timestamp.date_naive();
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Category label, or [`UNCATEGORIZED`]
pub fn category_key(observation: &Observation) -> String {
    observation
        .category
        .clone()
        .unwrap_or_else(|| UNCATEGORIZED.to_string())
}

/// Day of an observation; `None` when it carries no timestamp
pub fn observation_day(observation: &Observation) -> Option<NaiveDate> {
    observation.timestamp.as_ref().map(day_key)
}

/// Week of an observation; `None` when it carries no timestamp
pub fn observation_week(observation: &Observation) -> Option<NaiveDate> {
    observation.timestamp.as_ref().map(week_key)
}
