use super::protocol::ErrorResponse;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::time::Duration;

/// Every failure a relay endpoint can report to its caller.
///
/// The store itself never fails; these are produced by request validation and by
/// the submission modes that wait on the worker.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("{0}")]
    Validation(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Not found")]
    NotFound,

    #[error("No answer within {0:?}. The worker may be offline, try again later")]
    Timeout(Duration),

    #[error("Worker unreachable: {0}. Make sure the worker is running")]
    WorkerUnreachable(String),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::NotFound => StatusCode::NOT_FOUND,
            RelayError::Timeout(_) | RelayError::WorkerUnreachable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RelayError::Validation(_) => "validation",
            RelayError::MethodNotAllowed => "method_not_allowed",
            RelayError::NotFound => "not_found",
            RelayError::Timeout(_) => "timeout",
            RelayError::WorkerUnreachable(_) => "worker_unreachable",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
