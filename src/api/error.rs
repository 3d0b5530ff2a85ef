use crate::engine::EngineError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Failure of a client-facing request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(&'static str),

    /// The engine was unreachable, timed out or answered with an error.
    #[error("{action}: {source}")]
    Upstream {
        action: &'static str,
        #[source]
        source: EngineError,
    },
}

impl ApiError {
    pub fn upstream(action: &'static str) -> impl FnOnce(EngineError) -> ApiError {
        move |source| ApiError::Upstream { action, source }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    details: None,
                },
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: message.to_string(),
                    details: None,
                },
            ),
            ApiError::Upstream { action, source } => {
                tracing::error!("{}: {}", action, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: action.to_string(),
                        details: Some(source.details()),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
