use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::Form;
use tokio::task;

use finance_tracker_core::{NewCashEntry, Store};

use crate::error::AppError;
use crate::forms::{CashForm, DeleteCashForm};
use crate::state::AppState;
use crate::views;

/// `GET /cash` — entry form.
pub async fn cash_form() -> Html<String> {
    Html(views::cash_form_page())
}

/// `POST /cash` — validate, insert, redirect to the dashboard.
pub async fn submit_cash(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CashForm>,
) -> Result<Redirect, AppError> {
    let entry = NewCashEntry::try_from(form)?;
    let db_path = state.config.db_path.clone();
    task::spawn_blocking(move || Store::open(&db_path)?.insert_cash(&entry)).await??;
    Ok(Redirect::to("/"))
}

/// `POST /cash_delete` — delete by id (absent id is a no-op), redirect.
pub async fn delete_cash(
    State(state): State<Arc<AppState>>,
    Form(form): Form<DeleteCashForm>,
) -> Result<Redirect, AppError> {
    let db_path = state.config.db_path.clone();
    task::spawn_blocking(move || Store::open(&db_path)?.delete_cash(form.id)).await??;
    Ok(Redirect::to("/"))
}
