use serde::{Deserialize, Serialize};

use super::cash::CashEntry;
use super::position::Position;

/// Everything the dashboard page needs, computed fresh on every view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Σ TWD across all cash entries.
    pub twd_total: f64,

    /// Σ USD across all cash entries.
    pub usd_total: f64,

    /// USD→TWD conversion rate used for this view.
    pub exchange_rate: f64,

    /// `floor(twd_total + usd_total · exchange_rate)`.
    pub grand_total: i64,

    /// All cash rows, insertion order.
    pub cash_entries: Vec<CashEntry>,

    /// One position per distinct ticker, first-seen order.
    pub positions: Vec<Position>,

    /// Σ market value across positions (closed positions contribute zero).
    pub total_market_value: f64,
}
