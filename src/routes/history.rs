use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::SearchEntry,
    state::AppState,
};

/// Most-recent-first cap on the history listing
const SEARCH_HISTORY_LIMIT: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct CreateSearchRequest {
    pub mood: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search: SearchEntry,
}

#[derive(Debug, Serialize)]
pub struct SearchesResponse {
    pub searches: Vec<SearchEntry>,
}

/// Handler for recording a mood search
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateSearchRequest>,
) -> AppResult<(StatusCode, Json<SearchResponse>)> {
    if request.mood.trim().is_empty() {
        return Err(AppError::InvalidInput("Mood is required".to_string()));
    }

    let search = state
        .store
        .add_search(&request.mood, &request.genres)
        .await?;
    Ok((StatusCode::CREATED, Json(SearchResponse { search })))
}

/// Handler for listing recent searches
pub async fn list(State(state): State<AppState>) -> AppResult<Json<SearchesResponse>> {
    let searches = state.store.recent_searches(SEARCH_HISTORY_LIMIT).await?;
    Ok(Json(SearchesResponse { searches }))
}
