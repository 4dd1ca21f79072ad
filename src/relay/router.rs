use super::handlers::*;
use super::protocol::*;
use super::store::TaskStore;
use super::submit::Submitter;

use axum::{
    Extension, Router,
    http::{Method, header},
    routing::get,
    routing::post,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Builds the relay's HTTP router around an injected store and submitter.
///
/// Wrong verbs on a known path get a structured 405, unknown paths a structured 404.
/// Every response allows any origin.
pub fn build_router(store: Arc<dyn TaskStore>, submitter: Arc<Submitter>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            ENDPOINT_ASK,
            post(handle_ask)
                .options(handle_preflight)
                .fallback(handle_method_not_allowed),
        )
        // `get` also serves HEAD by default; poll and status consume state, so HEAD
        // must not reach them.
        .route(
            ENDPOINT_POLL,
            get(handle_poll)
                .head(handle_method_not_allowed)
                .fallback(handle_method_not_allowed),
        )
        .route(
            ENDPOINT_RESULT,
            post(handle_result)
                .options(handle_preflight)
                .fallback(handle_method_not_allowed),
        )
        .route(
            ENDPOINT_STATUS,
            get(handle_status)
                .head(handle_method_not_allowed)
                .fallback(handle_method_not_allowed),
        )
        .route(
            ENDPOINT_HEALTH,
            get(handle_health).fallback(handle_method_not_allowed),
        )
        .fallback(handle_not_found)
        .layer(Extension(store))
        .layer(Extension(submitter))
        .layer(cors)
}
