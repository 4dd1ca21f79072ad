use super::error::RelayError;
use super::protocol::*;
use super::store::TaskStore;
use super::submit::Submitter;
use super::types::TaskId;

use axum::{
    Extension, Json,
    extract::{
        Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;

pub async fn handle_ask(
    Extension(submitter): Extension<Arc<Submitter>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, RelayError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!("Rejected ask body: {}", e);
        RelayError::Validation(e.body_text())
    })?;

    let question = req.question.unwrap_or_default();
    let response = submitter.submit(&question).await?;
    Ok(Json(response))
}

pub async fn handle_poll(Extension(store): Extension<Arc<dyn TaskStore>>) -> Json<PollResponse> {
    match store.dequeue() {
        Some(task) => {
            tracing::info!("Task {} claimed by worker", task.id.0);
            Json(PollResponse {
                id: Some(task.id),
                question: Some(task.question),
            })
        }
        None => {
            tracing::trace!("Poll: queue empty");
            Json(PollResponse::empty())
        }
    }
}

pub async fn handle_result(
    Extension(store): Extension<Arc<dyn TaskStore>>,
    payload: Result<Json<ResultRequest>, JsonRejection>,
) -> Result<Json<ResultResponse>, RelayError> {
    let Json(req) = payload.map_err(|e| RelayError::Validation(e.body_text()))?;

    let (id, answer) = match (non_empty(req.id), non_empty(req.answer)) {
        (Some(id), Some(answer)) => (id, answer),
        _ => {
            return Err(RelayError::Validation(
                "Both id and answer are required".to_string(),
            ));
        }
    };

    tracing::info!("Answer received for task {} ({} bytes)", id, answer.len());
    store.publish_result(TaskId(id), answer);

    Ok(Json(ResultResponse { ok: true }))
}

pub async fn handle_status(
    Extension(store): Extension<Arc<dyn TaskStore>>,
    params: Result<Query<StatusParams>, QueryRejection>,
) -> Result<Json<StatusResponse>, RelayError> {
    let Query(params) = params.map_err(|e| RelayError::Validation(e.body_text()))?;
    let id = non_empty(params.id)
        .map(TaskId)
        .ok_or_else(|| RelayError::Validation("id is required".to_string()))?;

    match store.take_result(&id) {
        Some(answer) => {
            tracing::info!("Answer delivered for task {}", id.0);
            Ok(Json(StatusResponse {
                ready: true,
                answer: Some(answer),
            }))
        }
        None => {
            tracing::debug!("Task status query: {} -> not ready", id.0);
            Ok(Json(StatusResponse {
                ready: false,
                answer: None,
            }))
        }
    }
}

pub async fn handle_health(
    Extension(store): Extension<Arc<dyn TaskStore>>,
    Extension(submitter): Extension<Arc<Submitter>>,
) -> Json<HealthResponse> {
    let stats = store.stats();

    Json(HealthResponse {
        status: "ok".to_string(),
        mode: submitter.mode().name().to_string(),
        pending: stats.pending,
        unclaimed_results: stats.unclaimed_results,
        oldest_pending_age_ms: stats.oldest_pending_age_ms,
    })
}

/// CORS preflight on the mutating endpoints.
pub async fn handle_preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn handle_method_not_allowed() -> RelayError {
    RelayError::MethodNotAllowed
}

pub async fn handle_not_found() -> RelayError {
    RelayError::NotFound
}

/// Missing, empty and whitespace-only fields are all treated as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
