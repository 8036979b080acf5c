use thiserror::Error;

/// Failures surfaced by quoting, swapping and balance bookkeeping.
#[derive(Debug, Error)]
pub enum SwapError {
    /// Required input is missing or malformed. Nothing was sent upstream.
    #[error("Validation error: {0}")]
    Validation(String),
    /// Aggregator or quote service unreachable, or its body could not be parsed.
    #[error("Upstream error: {0}")]
    Upstream(String),
    /// Aggregator answered with an error payload.
    #[error("Aggregator error {code}: {message}")]
    Aggregator { code: i64, message: String },
    /// Transaction failed simulation.
    #[error("Gas estimation error: {0}")]
    GasEstimation(String),
    /// Signing or submission failed.
    #[error("Broadcast error: {0}")]
    Broadcast(String),
    #[error("Cache invalidation error: {0}")]
    CacheInvalidation(String),
    #[error("Timeout waiting for {0}")]
    Timeout(&'static str),
    #[error("Swap already in flight")]
    SwapInFlight,
    #[error("Config error: {0}")]
    Config(String),
}

impl SwapError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, SwapError::Timeout(_))
    }
}
