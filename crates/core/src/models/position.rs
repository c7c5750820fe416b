use serde::{Deserialize, Serialize};

/// The aggregated view of all transactions for one ticker.
///
/// Derived at read time by folding the ticker's `StockTransaction` rows —
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Exchange ticker.
    pub ticker: String,

    /// Net shares held: Σ shares across the ticker's rows.
    pub shares: i64,

    /// Total paid to acquire the position, fees and tax included:
    /// Σ (shares · unit_price + fee + tax) per row.
    pub cost_basis: f64,

    /// Market valuation; `Closed` when the net share count is zero.
    pub valuation: Valuation,
}

/// Valuation state of a position.
///
/// A ticker whose shares sum to zero is a closed position: there is nothing
/// to price, and the per-share metrics are undefined (the averages would
/// divide by zero). Closed positions carry no metrics and contribute nothing
/// to the total market value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Valuation {
    Open(OpenValuation),
    Closed,
}

/// Market metrics for a position with a non-zero share count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenValuation {
    /// Latest closing price fetched from the exchange.
    pub current_price: f64,

    /// `round(current_price · shares)` — rounded to a whole amount.
    pub market_value: f64,

    /// `cost_basis / shares`, 2-decimal rounding.
    pub average_cost: f64,

    /// `(market_value − cost_basis) · 100 / cost_basis`, 2-decimal rounding.
    /// Zero when the cost basis is zero.
    pub return_pct: f64,

    /// This position's share of the total stock market value, in percent,
    /// 2-decimal rounding. Zero when the total market value is zero.
    pub value_share_pct: f64,
}

impl Position {
    /// Market value of this position; closed positions are worth zero.
    #[must_use]
    pub fn market_value(&self) -> f64 {
        match &self.valuation {
            Valuation::Open(v) => v.market_value,
            Valuation::Closed => 0.0,
        }
    }

    /// Whether this position still holds shares.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.valuation, Valuation::Open(_))
    }
}
