use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use menu::DiningError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Date parameter is required")]
    MissingDate,

    #[error("{0}")]
    Rejection(String),

    #[error("API endpoint not found")]
    NotFound { path: String },

    #[error(transparent)]
    Dining(#[from] DiningError),
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejection(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejection(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingDate | AppError::Rejection(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Dining(DiningError::InvalidDate(_)) => StatusCode::BAD_REQUEST,
            AppError::Dining(DiningError::PeriodNotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Dining(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("{self}");
        }

        let body = match &self {
            AppError::NotFound { path } => json!({ "error": self.to_string(), "path": path }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
