use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cash ledger row: an amount deposited in one or both currencies.
///
/// Rows are append-and-delete only — there is no update operation anywhere
/// in the data model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashEntry {
    /// Store-generated row id (`transaction_id` column).
    pub id: i64,

    /// Amount in Taiwanese dollars.
    pub twd_amount: f64,

    /// Amount in US dollars.
    pub usd_amount: f64,

    /// Free-text memo entered with the deposit.
    pub note: String,

    /// Date of the deposit (daily granularity).
    pub date: NaiveDate,
}

/// A cash entry about to be inserted (no id yet).
#[derive(Debug, Clone, PartialEq)]
pub struct NewCashEntry {
    pub twd_amount: f64,
    pub usd_amount: f64,
    pub note: String,
    pub date: NaiveDate,
}

/// Summed cash holdings across all entries, per currency.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CashTotals {
    pub twd: f64,
    pub usd: f64,
}
