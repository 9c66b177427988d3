//! HTTP surface: router, handlers and error mapping.

pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

use crate::core::DbError;
use crate::service::ReportError;

pub use router::build_router;
pub use state::AppState;

/// Detail sent for every 500; the cause is only logged.
pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
}

#[derive(Debug)]
pub enum WebError {
    Database(DbError),
    Input(String),
    NotFound(String),
    Internal(String),
}

impl From<DbError> for WebError {
    fn from(err: DbError) -> Self {
        WebError::Database(err)
    }
}

impl From<ReportError> for WebError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Validation(message) => Self::Input(message),
            // the deployed API answers an unknown status with 404
            ReportError::InvalidStatus(message) => Self::NotFound(message),
            ReportError::NotFound(message) => Self::NotFound(message),
            ReportError::Database(err) => Self::Database(err),
        }
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Input(rejection.body_text())
    }
}

impl From<PathRejection> for WebError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(inner) => Self::Input(inner.body_text()),
            other => Self::Internal(other.body_text()),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            WebError::Database(err) => {
                error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_DETAIL.to_string(),
                    "database_error",
                )
            }
            WebError::Input(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg, "input_error"),
            WebError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "not_found"),
            WebError::Internal(msg) => {
                error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_DETAIL.to_string(),
                    "internal_error",
                )
            }
        };

        let body = Json(ErrorResponse {
            detail: message,
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, WebError>;
