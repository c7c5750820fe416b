use async_trait::async_trait;

use crate::errors::CoreError;

/// Trait abstraction for currency-rate sources.
///
/// The live implementation talks to rter.info; tests substitute their own.
/// If the API stops working or changes, only that one implementation is
/// replaced — the rest of the codebase is untouched.
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Current conversion rate from `base` to `quote` (e.g., "USD" → "TWD").
    async fn current_rate(&self, base: &str, quote: &str) -> Result<f64, CoreError>;
}

/// Trait abstraction for stock-quote sources.
#[async_trait]
pub trait StockQuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Latest daily closing price for `ticker`.
    async fn latest_close(&self, ticker: &str) -> Result<f64, CoreError>;
}
