use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::traits::ExchangeRateProvider;
use crate::errors::CoreError;

const BASE_URL: &str = "https://tw.rter.info/capi.php";

/// rter.info provider for fiat exchange rates.
///
/// - **Free**: no API key.
/// - **Shape**: one JSON object keyed by concatenated currency pair
///   (e.g. `"USDTWD"`), each value carrying an `Exrate` field.
pub struct RterProvider {
    client: Client,
}

impl RterProvider {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for RterProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── rter API response types ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RterQuote {
    #[serde(rename = "Exrate")]
    pub exrate: f64,
}

/// Pull one pair's rate out of the full quote map.
///
/// Split out of the HTTP call so the lookup logic is testable offline.
pub fn rate_from_quotes(
    quotes: &HashMap<String, RterQuote>,
    base: &str,
    quote: &str,
) -> Result<f64, CoreError> {
    let pair = format!("{}{}", base.to_uppercase(), quote.to_uppercase());
    quotes
        .get(&pair)
        .map(|q| q.exrate)
        .ok_or_else(|| CoreError::Api {
            provider: "rter".into(),
            message: format!("No rate found for {pair}"),
        })
}

#[async_trait]
impl ExchangeRateProvider for RterProvider {
    fn name(&self) -> &str {
        "rter"
    }

    async fn current_rate(&self, base: &str, quote: &str) -> Result<f64, CoreError> {
        if base.eq_ignore_ascii_case(quote) {
            return Ok(1.0);
        }

        let quotes: HashMap<String, RterQuote> = self
            .client
            .get(BASE_URL)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "rter".into(),
                message: format!("Failed to parse rate table: {e}"),
            })?;

        rate_from_quotes(&quotes, base, quote)
    }
}
