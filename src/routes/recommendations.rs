use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    routes::mood::MoodRequest,
    services::{self, Recommendation},
    state::AppState,
};

/// Handler for the full pipeline: mood text in, genres plus movies out
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<MoodRequest>,
) -> AppResult<Json<Recommendation>> {
    let recommendation =
        services::recommend(&*state.classifier, &*state.catalog, &request.mood).await?;
    Ok(Json(recommendation))
}
