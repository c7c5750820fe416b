use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use tokio::task;

use finance_tracker_core::{
    CashEntry, ChartOutcome, CoreError, Dashboard, StockTransaction, Store,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::views;

/// `GET /` — recompute everything, regenerate both chart artifacts, render.
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    // Read every row this view needs in one request-scoped store session.
    type LedgerRows = (Vec<CashEntry>, Vec<Vec<StockTransaction>>);

    let db_path = state.config.db_path.clone();
    let (cash_entries, groups) = task::spawn_blocking(move || -> Result<LedgerRows, CoreError> {
        let store = Store::open(&db_path)?;
        let cash = store.list_cash()?;
        let mut groups = Vec::new();
        for ticker in store.list_stock_tickers()? {
            let rows = store.list_stock_by_ticker(&ticker)?;
            groups.push(rows);
        }
        Ok((cash, groups))
    })
    .await??;

    // Live market data: one rate, plus one close per ticker still holding
    // shares. Closed positions are not priced.
    let exchange_rate = state.quotes.usd_twd_rate().await?;
    let mut prices = HashMap::new();
    let mut stock_rows = Vec::new();
    for rows in groups {
        if let Some(first) = rows.first() {
            if state.portfolio.net_shares(&rows) != 0 {
                let price = state.quotes.latest_close(&first.ticker).await?;
                prices.insert(first.ticker.clone(), price);
            }
        }
        stock_rows.extend(rows);
    }

    let dashboard =
        state
            .portfolio
            .build_dashboard(cash_entries, &stock_rows, exchange_rate, &prices)?;

    // Regenerate both chart artifacts for this view (render or retract).
    type ChartedDashboard = (Dashboard, ChartOutcome, ChartOutcome);

    let state_bg = Arc::clone(&state);
    let (dashboard, stock_chart, allocation_chart) =
        task::spawn_blocking(move || -> Result<ChartedDashboard, CoreError> {
            let stock_chart = state_bg.charts.render_stock_chart(&dashboard.positions)?;
            let allocation_chart = state_bg.charts.render_allocation_chart(
                dashboard.usd_total * dashboard.exchange_rate,
                dashboard.twd_total,
                dashboard.total_market_value,
            )?;
            Ok((dashboard, stock_chart, allocation_chart))
        })
        .await??;

    Ok(Html(views::dashboard_page(
        &dashboard,
        stock_chart == ChartOutcome::Rendered,
        allocation_chart == ChartOutcome::Rendered,
    )))
}
