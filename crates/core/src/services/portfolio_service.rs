use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::cash::{CashEntry, CashTotals};
use crate::models::dashboard::Dashboard;
use crate::models::position::{OpenValuation, Position, Valuation};
use crate::models::stock::StockTransaction;

/// Portfolio arithmetic: cash totals, position folds, dashboard assembly.
///
/// Pure business logic — no I/O, no API calls. Easy to test.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    // ── Cash ────────────────────────────────────────────────────────

    /// Sum all cash entries per currency.
    pub fn sum_cash(&self, entries: &[CashEntry]) -> CashTotals {
        let mut totals = CashTotals::default();
        for entry in entries {
            totals.twd += entry.twd_amount;
            totals.usd += entry.usd_amount;
        }
        totals
    }

    /// Combined cash holdings in TWD terms: `floor(twd + usd · rate)`.
    pub fn grand_total(&self, totals: &CashTotals, rate: f64) -> i64 {
        (totals.twd + totals.usd * rate).floor() as i64
    }

    // ── Stock ───────────────────────────────────────────────────────

    /// Net share count of a transaction list.
    pub fn net_shares(&self, rows: &[StockTransaction]) -> i64 {
        rows.iter().map(|t| t.shares).sum()
    }

    /// Group transactions by ticker, preserving first-seen ticker order and
    /// per-ticker row order. No row is lost or duplicated.
    pub fn group_by_ticker<'a>(
        &self,
        rows: &'a [StockTransaction],
    ) -> Vec<(String, Vec<&'a StockTransaction>)> {
        let mut groups: Vec<(String, Vec<&StockTransaction>)> = Vec::new();
        for row in rows {
            match groups.iter_mut().find(|(ticker, _)| *ticker == row.ticker) {
                Some((_, group)) => group.push(row),
                None => groups.push((row.ticker.clone(), vec![row])),
            }
        }
        groups
    }

    /// Fold each ticker's transactions into a `Position`.
    ///
    /// `prices` must carry a latest close for every ticker with a non-zero
    /// net share count; closed positions (net zero) are not priced. The
    /// second pass fills each open position's share of the total market
    /// value once that total is known.
    pub fn build_positions(
        &self,
        rows: &[StockTransaction],
        prices: &HashMap<String, f64>,
    ) -> Result<Vec<Position>, CoreError> {
        let mut positions = Vec::new();

        for (ticker, group) in self.group_by_ticker(rows) {
            let shares: i64 = group.iter().map(|t| t.shares).sum();
            let cost_basis: f64 = group
                .iter()
                .map(|t| t.shares as f64 * t.unit_price + t.fee + t.tax)
                .sum();

            let valuation = if shares == 0 {
                // Fully-sold ticker: nothing to price, per-share metrics are
                // undefined. Flagged as a distinct state instead of dividing.
                Valuation::Closed
            } else {
                let current_price = *prices
                    .get(&ticker)
                    .ok_or_else(|| CoreError::PriceNotAvailable {
                        ticker: ticker.clone(),
                    })?;
                let market_value = (current_price * shares as f64).round();
                let return_pct = if cost_basis != 0.0 {
                    round2((market_value - cost_basis) * 100.0 / cost_basis)
                } else {
                    0.0
                };
                Valuation::Open(OpenValuation {
                    current_price,
                    market_value,
                    average_cost: round2(cost_basis / shares as f64),
                    return_pct,
                    value_share_pct: 0.0, // filled below
                })
            };

            positions.push(Position {
                ticker,
                shares,
                cost_basis,
                valuation,
            });
        }

        let total_market_value: f64 = positions.iter().map(Position::market_value).sum();
        if total_market_value != 0.0 {
            for position in &mut positions {
                if let Valuation::Open(v) = &mut position.valuation {
                    v.value_share_pct = round2(v.market_value * 100.0 / total_market_value);
                }
            }
        }

        Ok(positions)
    }

    // ── Dashboard ───────────────────────────────────────────────────

    /// Assemble the full dashboard view-model from raw rows and fetched
    /// market data. Recomputed from scratch on every call.
    pub fn build_dashboard(
        &self,
        cash_entries: Vec<CashEntry>,
        stock_rows: &[StockTransaction],
        exchange_rate: f64,
        prices: &HashMap<String, f64>,
    ) -> Result<Dashboard, CoreError> {
        let totals = self.sum_cash(&cash_entries);
        let grand_total = self.grand_total(&totals, exchange_rate);
        let positions = self.build_positions(stock_rows, prices)?;
        let total_market_value = positions.iter().map(Position::market_value).sum();

        Ok(Dashboard {
            twd_total: totals.twd,
            usd_total: totals.usd,
            exchange_rate,
            grand_total,
            cash_entries,
            positions,
            total_market_value,
        })
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}

/// Round to 2 decimal places, the precision all derived percentages and
/// averages are reported at.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
