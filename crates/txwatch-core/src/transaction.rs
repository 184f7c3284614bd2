//! Monitored transaction records and their projection into observations

use crate::Observation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Buy,
    Sell,
}

/// Which numeric field of a transaction becomes the observation value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionMetric {
    #[default]
    Price,
    Quantity,
    /// Price × quantity
    Notional,
    /// Realized profit/loss
    Pnl,
}

impl TransactionMetric {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Price => "Price",
            Self::Quantity => "Quantity",
            Self::Notional => "Notional",
            Self::Pnl => "P&L",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Price, Self::Quantity, Self::Notional, Self::Pnl]
    }

    /// Read this metric from a transaction
    pub fn extract(&self, tx: &Transaction) -> f64 {
        match self {
            Self::Price => tx.price,
            Self::Quantity => tx.quantity,
            Self::Notional => tx.notional(),
            Self::Pnl => tx.pnl,
        }
    }
}

impl std::fmt::Display for TransactionMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Individual monitored transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub account: String,
    /// Asset or product line (e.g. "gold", "silver")
    pub category: String,
    pub side: Side,
    pub price: f64,
    pub quantity: f64,
    pub pnl: f64,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Create new transaction with auto-generated ID, zero P&L, stamped now
    pub fn new(
        account: impl Into<String>,
        category: impl Into<String>,
        side: Side,
        price: f64,
        quantity: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account: account.into(),
            category: category.into(),
            side,
            price,
            quantity,
            pnl: 0.0,
            timestamp: Utc::now(),
        }
    }

    /// Builder: set realized P&L
    pub fn with_pnl(mut self, pnl: f64) -> Self {
        self.pnl = pnl;
        self
    }

    /// Builder: set timestamp
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Transaction value (price × quantity)
    pub fn notional(&self) -> f64 {
        self.price * self.quantity
    }

    /// Project into an observation carrying id, category and timestamp
    pub fn to_observation(&self, metric: TransactionMetric) -> Observation {
        Observation::new(metric.extract(self))
            .with_id(self.id.clone())
            .with_category(self.category.clone())
            .with_timestamp(self.timestamp)
    }
}

/// Project a slice of transactions into observations for one metric
pub fn project(transactions: &[Transaction], metric: TransactionMetric) -> Vec<Observation> {
    transactions.iter().map(|tx| tx.to_observation(metric)).collect()
}
