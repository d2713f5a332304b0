use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    pub mood: String,
}

#[derive(Debug, Serialize)]
pub struct GenresResponse {
    pub genres: Vec<String>,
}

/// Handler for mood classification: mood text in, genre names out
pub async fn mood_to_genres(
    State(state): State<AppState>,
    Json(request): Json<MoodRequest>,
) -> AppResult<Json<GenresResponse>> {
    if request.mood.trim().is_empty() {
        return Err(AppError::InvalidInput("Mood is required".to_string()));
    }

    let genres = state.classifier.classify(&request.mood).await?;
    Ok(Json(GenresResponse { genres }))
}
