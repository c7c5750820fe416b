use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single stock trade as entered by the user.
///
/// `shares` is signed: a negative count records a sell. Transactions are
/// append-only — no update or delete operation exists for stock rows
/// (intentional asymmetry with the cash table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransaction {
    /// Store-generated row id.
    pub id: i64,

    /// Exchange ticker (e.g., "2330", "0050").
    pub ticker: String,

    /// Number of shares; negative for sells.
    pub shares: i64,

    /// Price paid per share.
    pub unit_price: f64,

    /// Broker processing fee for this trade.
    pub fee: f64,

    /// Transaction tax for this trade.
    pub tax: f64,

    /// Trade date (daily granularity).
    pub date: NaiveDate,
}

/// A stock transaction about to be inserted (no id yet).
#[derive(Debug, Clone, PartialEq)]
pub struct NewStockTransaction {
    pub ticker: String,
    pub shares: i64,
    pub unit_price: f64,
    pub fee: f64,
    pub tax: f64,
    pub date: NaiveDate,
}
