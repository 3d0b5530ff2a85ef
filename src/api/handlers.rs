use super::error::ApiError;
use super::router::AppState;
use axum::Json;
use axum::extract::State;
use serde_json::Value;

pub async fn handle_health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let health = state
        .engine
        .health()
        .await
        .map_err(ApiError::upstream("Error fetching cluster health"))?;
    Ok(Json(health))
}
