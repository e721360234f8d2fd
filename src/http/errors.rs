//! # API Errors
//!
//! One error type for the HTTP surface, folding the module errors into an
//! HTTP status and a JSON envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::auth::AuthError;
use crate::executor::ExecutorError;
use crate::metrics::MetricsError;
use crate::query::QueryError;

/// Errors surfaced by the HTTP endpoints
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Criteria parsing or compilation failure
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Listing execution failure
    #[error(transparent)]
    Executor(#[from] ExecutorError),

    /// Metrics computation failure
    #[error(transparent)]
    Metrics(#[from] MetricsError),

    /// Authentication failure
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            ApiError::Query(e) => e.status_code(),
            ApiError::Executor(e) => e.status_code(),
            ApiError::Metrics(e) => e.status_code(),
            ApiError::Auth(e) => e.status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
            code: err.status_code().as_u16(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
