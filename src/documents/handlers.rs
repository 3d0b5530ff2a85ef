use crate::api::{ApiError, AppState};
use crate::search::normalize::{TEXT_PARAM, normalize_param, single_value};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::Value;

pub async fn handle_create_document(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let response = state
        .engine
        .create(&body)
        .await
        .map_err(ApiError::upstream("Error creating document"))?;
    tracing::info!("Created document {}", response["_id"]);
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn handle_replace_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let response = state
        .engine
        .replace(&id, &body)
        .await
        .map_err(ApiError::upstream("Error updating document"))?;
    tracing::info!("Replaced document {}", id);
    Ok(Json(response))
}

pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    match state.engine.get(&id).await {
        Ok(Some(document)) => Ok(Json(document)),
        Ok(None) => Err(ApiError::NotFound("Document not found")),
        Err(e) => Err(ApiError::upstream("Error fetching document")(e)),
    }
}

/// `DELETE /documents?q=` removes every document whose `word` equals `q` exactly.
pub async fn handle_delete_documents(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, ApiError> {
    let Some(word) = normalize_param(single_value(&pairs, TEXT_PARAM)) else {
        return Err(ApiError::BadRequest(
            "Missing query parameter 'q'".to_string(),
        ));
    };

    let response = state
        .engine
        .delete_by_word(&word)
        .await
        .map_err(ApiError::upstream("Error deleting documents"))?;
    tracing::info!("Deleted documents for word '{}': {}", word, response["deleted"]);
    Ok(Json(response))
}
