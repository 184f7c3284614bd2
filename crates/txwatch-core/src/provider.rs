//! Observation sources behind a single trait seam.
//!
//! Charts never talk to a backend directly: they ask an
//! [`ObservationProvider`] for observations and hand them to the statistics
//! engine. [`MockProvider`] stands in for a real backend during development.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{project, Observation, ProviderError, Side, Transaction, TransactionMetric};

// ============================================================================
// STRATEGY PATTERN: Observation Provider
// ============================================================================

/// Strategy trait for anything that can supply observations
pub trait ObservationProvider: Send + Sync {
    fn fetch_observations(&self, query: &ObservationQuery) -> Result<Vec<Observation>, ProviderError>;
}

/// What to fetch: one metric, optionally narrowed by category, time and count
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationQuery {
    pub metric: TransactionMetric,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
    /// Keep only the most recent N matches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ObservationQuery {
    pub fn new(metric: TransactionMetric) -> Self {
        Self {
            metric,
            ..Default::default()
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Run this query over an in-memory set of transactions
    pub fn apply(&self, transactions: &[Transaction]) -> Result<Vec<Observation>, ProviderError> {
        if self.limit == Some(0) {
            return Err(ProviderError::InvalidLimit);
        }

        let mut matched: Vec<Transaction> = transactions
            .iter()
            .filter(|tx| self.category.as_ref().is_none_or(|c| &tx.category == c))
            .filter(|tx| self.since.is_none_or(|since| tx.timestamp >= since))
            .cloned()
            .collect();

        if let Some(category) = &self.category {
            if matched.is_empty() {
                return Err(ProviderError::EmptyCategory(category.clone()));
            }
        }

        if let Some(limit) = self.limit {
            matched.sort_by_key(|tx| tx.timestamp);
            let start = matched.len().saturating_sub(limit);
            matched = matched.split_off(start);
        }

        Ok(project(&matched, self.metric))
    }
}

// ============================================================================
// IN-MEMORY PROVIDER
// ============================================================================

/// Provider over a fixed set of transactions
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    transactions: Vec<Transaction>,
}

impl InMemoryProvider {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl ObservationProvider for InMemoryProvider {
    fn fetch_observations(&self, query: &ObservationQuery) -> Result<Vec<Observation>, ProviderError> {
        query.apply(&self.transactions)
    }
}

// ============================================================================
// MOCK PROVIDER
// ============================================================================

/// Mock market configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    pub seed: u64,
    pub transaction_count: usize,
    /// Category name and its starting price
    pub categories: Vec<(String, f64)>,
    /// Per-step relative price move
    pub volatility: f64,
    /// Probability that a transaction's P&L is blown up into a spike
    pub spike_probability: f64,
    pub start: DateTime<Utc>,
    pub spacing_minutes: i64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            transaction_count: 500,
            categories: vec![
                ("gold".to_string(), 2000.0),
                ("silver".to_string(), 25.0),
                ("platinum".to_string(), 950.0),
                ("palladium".to_string(), 1100.0),
            ],
            volatility: 0.002,
            spike_probability: 0.02,
            start: DateTime::<Utc>::UNIX_EPOCH + Duration::days(19_723),
            spacing_minutes: 30,
        }
    }
}

impl MockConfig {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn transaction_count(mut self, count: usize) -> Self {
        self.transaction_count = count;
        self
    }

    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = start;
        self
    }
}

/// Per-category random walk state
struct MockMarket {
    category: String,
    price: f64,
    trend: f64,
}

impl MockMarket {
    fn tick(&mut self, rng: &mut StdRng, volatility: f64) -> f64 {
        let drift = self.trend * 0.0001;
        let random = (rng.r#gen::<f64>() - 0.5) * 2.0 * volatility;

        if rng.r#gen::<f64>() < 0.01 {
            self.trend = (rng.r#gen::<f64>() - 0.5) * 2.0;
        }

        self.price *= 1.0 + drift + random;
        self.price = self.price.max(0.01);
        self.price
    }
}

/// Seeded synthetic transaction source. The same seed always yields the
/// same transactions, so charts built on it are reproducible.
#[derive(Debug, Clone)]
pub struct MockProvider {
    transactions: Vec<Transaction>,
}

impl MockProvider {
    pub fn new(config: MockConfig) -> Self {
        Self {
            transactions: generate_transactions(&config),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(MockConfig::default().seed(seed))
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(MockConfig::default())
    }
}

impl ObservationProvider for MockProvider {
    fn fetch_observations(&self, query: &ObservationQuery) -> Result<Vec<Observation>, ProviderError> {
        query.apply(&self.transactions)
    }
}

fn generate_transactions(config: &MockConfig) -> Vec<Transaction> {
    if config.categories.is_empty() {
        tracing::warn!("mock config has no categories, generating nothing");
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut markets: Vec<MockMarket> = config
        .categories
        .iter()
        .map(|(category, price)| MockMarket {
            category: category.clone(),
            price: *price,
            trend: 0.0,
        })
        .collect();

    let mut transactions = Vec::with_capacity(config.transaction_count);

    for i in 0..config.transaction_count {
        let market = &mut markets[rng.gen_range(0..config.categories.len())];
        let price = market.tick(&mut rng, config.volatility);

        let side = if rng.r#gen::<bool>() { Side::Buy } else { Side::Sell };
        let quantity = (rng.r#gen::<f64>().exp() * 0.5).min(10.0);

        let mut pnl = (rng.r#gen::<f64>() - 0.5) * 2.0 * price * quantity * 0.01;
        if rng.r#gen::<f64>() < config.spike_probability {
            pnl *= 25.0;
        }

        let timestamp = config.start + Duration::minutes(config.spacing_minutes * i as i64);
        let account = format!("acct-{:03}", rng.gen_range(0..50));

        let mut tx = Transaction::new(account, market.category.clone(), side, price, quantity)
            .with_pnl(pnl)
            .at(timestamp);
        tx.id = format!("tx-{}-{:06}", config.seed, i);
        transactions.push(tx);
    }

    tracing::debug!(
        seed = config.seed,
        count = transactions.len(),
        "generated mock transactions"
    );

    transactions
}
