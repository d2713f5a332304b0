/// Movie discovery via the TMDB API
///
/// Genre names are translated to TMDB ids through the injected vocabulary and
/// passed to the `/discover/movie` endpoint as a comma-joined match-any set.
/// Unlike the classifier there is no safe default movie list, so transport
/// and status failures propagate to the caller.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{MovieRecord, TmdbMovie},
    services::genres::GenreVocabulary,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Looks up movies matching a set of genre names
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Fetches the first page of popular movies matching any of the genres
    ///
    /// Returns an empty list when no genre translates to a known id; errors
    /// with Configuration when no API key is available.
    async fn discover_by_genres(&self, genres: &[String]) -> AppResult<Vec<MovieRecord>>;
}

#[derive(Clone)]
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: Option<String>,
    base_url: String,
    vocabulary: GenreVocabulary,
}

impl TmdbCatalog {
    pub fn new(api_key: Option<String>, base_url: String, vocabulary: GenreVocabulary) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            base_url,
            vocabulary,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DiscoverResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbCatalog {
    async fn discover_by_genres(&self, genres: &[String]) -> AppResult<Vec<MovieRecord>> {
        if genres.is_empty() {
            return Ok(vec![]);
        }

        // All names unknown means nothing to filter on; skip the network call.
        let genre_ids = self.vocabulary.translate(genres);
        if genre_ids.is_empty() {
            tracing::debug!(genres = ?genres, "No genre translated to a TMDB id");
            return Ok(vec![]);
        }

        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::Configuration("TMDB_API_KEY is not set".to_string())
        })?;

        let with_genres = genre_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        let url = format!("{}/discover/movie", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", api_key),
                ("with_genres", with_genres.as_str()),
                ("sort_by", "popularity.desc"),
                ("include_adult", "false"),
                ("page", "1"),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let discover: DiscoverResponse = response.json().await?;
        let movies: Vec<MovieRecord> = discover.results.into_iter().map(MovieRecord::from).collect();

        tracing::info!(
            genre_ids = %with_genres,
            results = movies.len(),
            "TMDB discovery completed"
        );

        Ok(movies)
    }
}
