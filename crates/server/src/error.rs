use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use finance_tracker_core::CoreError;

use crate::forms::FormError;
use crate::views;

/// Errors surfaced by request handlers.
///
/// Validation failures get a page naming the offending field; everything
/// else is logged and rendered as an opaque error page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("blocking task failed: {e}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Form(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(views::validation_error_page(&e.to_string())),
            )
                .into_response(),
            other => {
                tracing::error!("request failed: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::server_error_page()),
                )
                    .into_response()
            }
        }
    }
}
