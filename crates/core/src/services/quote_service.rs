use crate::errors::CoreError;
use crate::providers::rter::RterProvider;
use crate::providers::traits::{ExchangeRateProvider, StockQuoteProvider};
use crate::providers::twse::TwseProvider;

/// Attempts per external call: the first try plus one retry. Only transient
/// network failures are retried — a malformed response won't heal on retry.
const MAX_ATTEMPTS: u32 = 2;

/// Fetches live market data through the provider seams, with a bounded
/// retry for transient network failures.
///
/// Nothing is cached: every dashboard view refetches the rate and each
/// open ticker's latest close.
pub struct QuoteService {
    rates: Box<dyn ExchangeRateProvider>,
    quotes: Box<dyn StockQuoteProvider>,
}

impl QuoteService {
    pub fn new(
        rates: Box<dyn ExchangeRateProvider>,
        quotes: Box<dyn StockQuoteProvider>,
    ) -> Self {
        Self { rates, quotes }
    }

    /// Wire up the live providers (rter.info rates, TWSE quotes).
    pub fn new_with_defaults() -> Self {
        Self::new(
            Box::new(RterProvider::new()),
            Box::new(TwseProvider::new()),
        )
    }

    /// Current USD→TWD conversion rate.
    pub async fn usd_twd_rate(&self) -> Result<f64, CoreError> {
        let mut last_err = None;
        for attempt in 1..=MAX_ATTEMPTS {
            match self.rates.current_rate("USD", "TWD").await {
                Ok(rate) => return Ok(rate),
                Err(CoreError::Network(msg)) => {
                    tracing::warn!(
                        provider = self.rates.name(),
                        attempt,
                        "rate fetch failed: {msg}"
                    );
                    last_err = Some(CoreError::Network(msg));
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_err.unwrap_or_else(|| CoreError::Network("no fetch attempts made".into())))
    }

    /// Latest daily closing price for one ticker.
    pub async fn latest_close(&self, ticker: &str) -> Result<f64, CoreError> {
        let mut last_err = None;
        for attempt in 1..=MAX_ATTEMPTS {
            match self.quotes.latest_close(ticker).await {
                Ok(price) => return Ok(price),
                Err(CoreError::Network(msg)) => {
                    tracing::warn!(
                        provider = self.quotes.name(),
                        attempt,
                        ticker,
                        "quote fetch failed: {msg}"
                    );
                    last_err = Some(CoreError::Network(msg));
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_err.unwrap_or_else(|| CoreError::Network("no fetch attempts made".into())))
    }
}
