use super::projection::project_hits;
use super::query::shape_query;
use super::types::{SearchTerms, WordResult};
use crate::api::{ApiError, AppState};
use axum::Json;
use axum::extract::{Query, State};

/// `GET /search?q=&t=`. Both parameters are optional.
pub async fn handle_search(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<WordResult>>, ApiError> {
    let terms = SearchTerms::from_query_pairs(&pairs);
    let query = shape_query(&terms);

    let hits = state
        .engine
        .search(&query)
        .await
        .map_err(ApiError::upstream("Error searching documents"))?;

    let results = project_hits(hits, terms.is_type_filtered());
    tracing::info!(
        "Search q={:?} t={:?} returned {} result(s)",
        terms.text,
        terms.kind,
        results.len()
    );
    Ok(Json(results))
}
