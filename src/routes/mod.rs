use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub mod favourites;
pub mod history;
pub mod mood;
pub mod movies;
pub mod recommendations;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        // Allow all origins for now; tighten once a frontend host is fixed.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/mood-to-genres", post(mood::mood_to_genres))
        .route("/movies", get(movies::by_genres))
        .route("/recommendations", post(recommendations::recommend))
        .route("/favourites", post(favourites::create).get(favourites::list))
        .route("/searches", post(history::create).get(history::list))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
