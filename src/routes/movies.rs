use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    /// Comma-separated genre names, e.g. `?genres=Drama,Romance`
    #[serde(default)]
    genres: String,
}

#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub movies: Vec<MovieRecord>,
}

/// Handler for genre-based movie discovery
pub async fn by_genres(
    State(state): State<AppState>,
    Query(params): Query<MoviesQuery>,
) -> AppResult<Json<MoviesResponse>> {
    let genre_names: Vec<String> = params
        .genres
        .split(',')
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect();

    if genre_names.is_empty() {
        return Err(AppError::InvalidInput(
            "At least one genre is required".to_string(),
        ));
    }

    let movies = state.catalog.discover_by_genres(&genre_names).await?;
    Ok(Json(MoviesResponse { movies }))
}
