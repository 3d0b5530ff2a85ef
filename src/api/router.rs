use super::handlers::handle_health;
use crate::documents::handlers::{
    handle_create_document, handle_delete_documents, handle_get_document,
    handle_replace_document,
};
use crate::engine::Engine;
use crate::search::handlers::handle_search;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

// --- API Endpoints ---

pub const ENDPOINT_HEALTH: &str = "/health";
pub const ENDPOINT_DOCUMENTS: &str = "/documents";
pub const ENDPOINT_DOCUMENT: &str = "/documents/:id";
pub const ENDPOINT_SEARCH: &str = "/search";

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

impl AppState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(ENDPOINT_HEALTH, get(handle_health))
        .route(
            ENDPOINT_DOCUMENTS,
            post(handle_create_document).delete(handle_delete_documents),
        )
        .route(
            ENDPOINT_DOCUMENT,
            get(handle_get_document).put(handle_replace_document),
        )
        .route(ENDPOINT_SEARCH, get(handle_search))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Request handler panicked: {}", details);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error", "details": details })),
    )
        .into_response()
}
