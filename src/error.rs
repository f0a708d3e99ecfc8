use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::services::validation::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("order failed validation")]
    Validation(FieldErrors),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Validation(errs) => {
                tracing::debug!(?errs, "rejected order submission");
                (status, Json(json!({ "detail": errs }))).into_response()
            }
            AppError::Storage(e) => {
                // Internal detail stays in the log.
                tracing::error!(error = %e, "storage failure");
                (status, Json(json!({ "detail": "Internal Server Error" }))).into_response()
            }
        }
    }
}
