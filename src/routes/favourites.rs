use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{Favourite, NewFavourite},
    state::AppState,
};

/// Favourite payload as sent by the client
///
/// `catalogId` is optional at the wire level so its absence surfaces as the
/// same 400 as a missing title rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouritePayload {
    #[serde(default)]
    pub catalog_id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub release_date: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateFavouriteRequest {
    pub movie: FavouritePayload,
}

#[derive(Debug, Serialize)]
pub struct FavouriteResponse {
    pub favourite: Favourite,
}

#[derive(Debug, Serialize)]
pub struct FavouritesResponse {
    pub favourites: Vec<Favourite>,
}

/// Handler for saving a favourite movie
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateFavouriteRequest>,
) -> AppResult<(StatusCode, Json<FavouriteResponse>)> {
    let movie = request.movie;

    let Some(catalog_id) = movie.catalog_id else {
        return Err(AppError::InvalidInput(
            "catalogId and title are required".to_string(),
        ));
    };
    if movie.title.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "catalogId and title are required".to_string(),
        ));
    }

    let favourite = state
        .store
        .add_favourite(NewFavourite {
            catalog_id,
            title: movie.title,
            overview: movie.overview,
            poster_path: movie.poster_path,
            rating: movie.rating,
            release_date: movie.release_date,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(FavouriteResponse { favourite })))
}

/// Handler for listing favourites, most recent first
pub async fn list(State(state): State<AppState>) -> AppResult<Json<FavouritesResponse>> {
    let favourites = state.store.list_favourites().await?;
    Ok(Json(FavouritesResponse { favourites }))
}
