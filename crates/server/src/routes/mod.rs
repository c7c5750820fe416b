use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub mod cash;
pub mod dashboard;
pub mod stock;

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/cash", get(cash::cash_form).post(cash::submit_cash))
        .route("/cash_delete", post(cash::delete_cash))
        .route("/stock", get(stock::stock_form).post(stock::submit_stock))
        .with_state(state)
}
