//! Numeric observations fed into the statistics engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single numeric observation with optional metadata.
///
/// Observations are immutable once built; the `with_*` builders consume
/// and return `Self`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Observation {
    /// Create a bare observation with no metadata
    pub fn new(value: f64) -> Self {
        Self {
            value,
            id: None,
            category: None,
            timestamp: None,
        }
    }

    /// Builder: set identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder: set category label
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder: set timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
    }
}

impl From<f64> for Observation {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Wrap bare values as observations
pub fn observations_from_values(values: &[f64]) -> Vec<Observation> {
    values.iter().copied().map(Observation::new).collect()
}

/// Drop observations whose value is NaN or infinite.
///
/// The statistics engine requires finite input and does not filter on its
/// own; call this on data from sources that may emit non-finite values.
pub fn sanitize(observations: Vec<Observation>) -> Vec<Observation> {
    let before = observations.len();
    let clean: Vec<Observation> = observations.into_iter().filter(Observation::is_finite).collect();

    let dropped = before - clean.len();
    if dropped > 0 {
        tracing::warn!(dropped, kept = clean.len(), "dropped non-finite observations");
    }

    clean
}
