use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::Form;
use tokio::task;

use finance_tracker_core::{NewStockTransaction, Store};

use crate::error::AppError;
use crate::forms::StockForm;
use crate::state::AppState;
use crate::views;

/// `GET /stock` — entry form.
pub async fn stock_form() -> Html<String> {
    Html(views::stock_form_page())
}

/// `POST /stock` — validate, insert, redirect to the dashboard.
/// There is no delete or update route for stock rows.
pub async fn submit_stock(
    State(state): State<Arc<AppState>>,
    Form(form): Form<StockForm>,
) -> Result<Redirect, AppError> {
    let tx = NewStockTransaction::try_from(form)?;
    let db_path = state.config.db_path.clone();
    task::spawn_blocking(move || Store::open(&db_path)?.insert_stock(&tx)).await??;
    Ok(Redirect::to("/"))
}
