use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::traits::StockQuoteProvider;
use crate::errors::CoreError;

const BASE_URL: &str = "https://www.twse.com.tw/exchangeReport/STOCK_DAY";

/// Column index of the closing price in a TWSE daily row.
/// Rows are `[date, volume, value, open, high, low, close, change, txns]`,
/// every field a string, numbers carrying thousands separators.
const CLOSE_COLUMN: usize = 6;

/// Taiwan Stock Exchange provider for daily closing prices.
///
/// - **Free**: no API key.
/// - **Endpoint**: `STOCK_DAY` returns the current month's daily rows for
///   one ticker; the latest close is the last row's close column.
/// - A ticker with no trading data for the month comes back with a non-OK
///   `stat` and no `data` array.
pub struct TwseProvider {
    client: Client,
}

impl TwseProvider {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for TwseProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── TWSE API response types ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StockDayResponse {
    pub stat: String,
    #[serde(default)]
    pub data: Vec<Vec<String>>,
}

/// Extract the latest closing price from a `STOCK_DAY` response.
///
/// Split out of the HTTP call so the extraction logic is testable offline.
pub fn latest_close_from(resp: &StockDayResponse, ticker: &str) -> Result<f64, CoreError> {
    if resp.stat != "OK" {
        return Err(CoreError::Api {
            provider: "TWSE".into(),
            message: format!("No trading data for {ticker}: {}", resp.stat),
        });
    }

    let last_row = resp.data.last().ok_or_else(|| CoreError::Api {
        provider: "TWSE".into(),
        message: format!("Empty price history for {ticker}"),
    })?;

    let close = last_row.get(CLOSE_COLUMN).ok_or_else(|| CoreError::Api {
        provider: "TWSE".into(),
        message: format!("Malformed daily row for {ticker}: {last_row:?}"),
    })?;

    parse_close(close).ok_or_else(|| CoreError::Api {
        provider: "TWSE".into(),
        message: format!("Invalid close price '{close}' for {ticker}"),
    })
}

/// Parse a TWSE price field, stripping thousands separators ("1,234.50").
pub fn parse_close(price: &str) -> Option<f64> {
    price.replace(',', "").parse().ok()
}

#[async_trait]
impl StockQuoteProvider for TwseProvider {
    fn name(&self) -> &str {
        "TWSE"
    }

    async fn latest_close(&self, ticker: &str) -> Result<f64, CoreError> {
        let resp: StockDayResponse = self
            .client
            .get(BASE_URL)
            // "respose" is the spelling the exchange actually accepts
            .query(&[("respose", "json"), ("stockNo", ticker)])
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "TWSE".into(),
                message: format!("Failed to parse daily report for {ticker}: {e}"),
            })?;

        latest_close_from(&resp, ticker)
    }
}
