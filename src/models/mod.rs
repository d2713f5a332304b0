use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed user identity; the API has no accounts or authentication
pub const DEMO_USER_ID: &str = "demo-user";

/// A movie returned to the client, shaped from a TMDB discovery entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    /// TMDB movie id
    pub catalog_id: i64,
    pub title: String,
    /// May be empty when TMDB has no synopsis
    pub overview: String,
    /// Relative poster path fragment, may be empty
    pub poster_path: String,
    /// Average vote on the 0-10 scale, 0 when unknown
    pub rating: f64,
    /// ISO date text, may be empty
    pub release_date: String,
}

// ============================================================================
// TMDB Discovery API Types
// ============================================================================

/// Raw entry from the TMDB `/discover/movie` response
///
/// TMDB omits or nulls optional fields on obscure titles, so everything
/// beyond id and title is optional here and defaulted during conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl From<TmdbMovie> for MovieRecord {
    fn from(movie: TmdbMovie) -> Self {
        MovieRecord {
            catalog_id: movie.id,
            title: movie.title,
            overview: movie.overview.unwrap_or_default(),
            poster_path: movie.poster_path.unwrap_or_default(),
            rating: movie.vote_average.unwrap_or(0.0),
            release_date: movie.release_date.unwrap_or_default(),
        }
    }
}

// ============================================================================
// Persistence Types
// ============================================================================

/// A favourite movie saved by the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Favourite {
    pub id: Uuid,
    pub user_id: String,
    pub catalog_id: i64,
    pub title: String,
    pub overview: String,
    pub poster_path: String,
    pub rating: f64,
    pub release_date: String,
    pub created_at: DateTime<Utc>,
}

/// Validated favourite fields handed to the store for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewFavourite {
    pub catalog_id: i64,
    pub title: String,
    pub overview: String,
    pub poster_path: String,
    pub rating: f64,
    pub release_date: String,
}

/// A past mood search and the genres it resolved to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    pub id: Uuid,
    pub user_id: String,
    pub mood: String,
    pub genres: Vec<String>,
    pub created_at: DateTime<Utc>,
}
