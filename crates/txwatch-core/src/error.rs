use thiserror::Error;

/// All errors generated by an [`ObservationProvider`](crate::ObservationProvider).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("no transactions found for category: {0}")]
    EmptyCategory(String),

    #[error("query limit must be greater than zero")]
    InvalidLimit,

    #[error("data source unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    /// Whether a caller should treat this as "no data" rather than a failure.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, ProviderError::EmptyCategory(_))
    }
}
