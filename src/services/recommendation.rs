use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
    services::{catalog::MovieCatalog, mood::MoodClassifier},
};

/// Result of the full mood-to-movies pipeline
///
/// The genre list is populated even when no movie matched, since "nothing in
/// the catalog" is a valid terminal outcome for a successfully classified mood.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub genres: Vec<String>,
    pub movies: Vec<MovieRecord>,
}

/// Runs the two-stage pipeline: classify the mood, then discover movies
///
/// Classification never fails for upstream reasons (it degrades to a default
/// genre pair), so the only error sources are empty input and catalog access.
pub async fn recommend(
    classifier: &dyn MoodClassifier,
    catalog: &dyn MovieCatalog,
    mood: &str,
) -> AppResult<Recommendation> {
    let mood = mood.trim();
    if mood.is_empty() {
        return Err(AppError::InvalidInput("Mood is required".to_string()));
    }

    let genres = classifier.classify(mood).await?;
    let movies = catalog.discover_by_genres(&genres).await?;

    tracing::info!(
        genres = ?genres,
        movies = movies.len(),
        "Recommendation pipeline completed"
    );

    Ok(Recommendation { genres, movies })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::MockMovieCatalog;
    use crate::services::mood::MockMoodClassifier;

    fn inception() -> MovieRecord {
        MovieRecord {
            catalog_id: 27205,
            title: "Inception".to_string(),
            overview: "A thief who steals corporate secrets.".to_string(),
            poster_path: "/abc.jpg".to_string(),
            rating: 8.4,
            release_date: "2010-07-16".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_mood_rejected_before_any_call() {
        let classifier = MockMoodClassifier::new();
        let catalog = MockMovieCatalog::new();

        let result = recommend(&classifier, &catalog, "  \t ").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_happy_path_returns_genres_and_movies() {
        let mut classifier = MockMoodClassifier::new();
        classifier
            .expect_classify()
            .times(1)
            .returning(|_| Ok(vec!["Horror".to_string(), "Thriller".to_string()]));

        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_discover_by_genres()
            .withf(|genres| genres.len() == 2 && genres[0] == "Horror" && genres[1] == "Thriller")
            .times(1)
            .returning(|_| Ok(vec![inception()]));

        let result = recommend(&classifier, &catalog, "I want something scary")
            .await
            .unwrap();

        assert_eq!(result.genres, vec!["Horror", "Thriller"]);
        assert_eq!(result.movies, vec![inception()]);
    }

    #[tokio::test]
    async fn test_genres_returned_even_when_no_movies_match() {
        let mut classifier = MockMoodClassifier::new();
        classifier
            .expect_classify()
            .returning(|_| Ok(vec!["Western".to_string()]));

        let mut catalog = MockMovieCatalog::new();
        catalog.expect_discover_by_genres().returning(|_| Ok(vec![]));

        let result = recommend(&classifier, &catalog, "dusty frontier vibes")
            .await
            .unwrap();

        assert_eq!(result.genres, vec!["Western"]);
        assert!(result.movies.is_empty());
    }

    #[tokio::test]
    async fn test_catalog_configuration_error_propagates() {
        let mut classifier = MockMoodClassifier::new();
        classifier
            .expect_classify()
            .returning(|_| Ok(vec!["Drama".to_string()]));

        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_discover_by_genres()
            .returning(|_| Err(AppError::Configuration("TMDB_API_KEY is not set".to_string())));

        let result = recommend(&classifier, &catalog, "anything").await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_mood_is_trimmed_before_classification() {
        let mut classifier = MockMoodClassifier::new();
        classifier
            .expect_classify()
            .withf(|mood| mood == "cozy")
            .returning(|_| Ok(vec!["Romance".to_string()]));

        let mut catalog = MockMovieCatalog::new();
        catalog.expect_discover_by_genres().returning(|_| Ok(vec![]));

        let result = recommend(&classifier, &catalog, "  cozy  ").await.unwrap();
        assert_eq!(result.genres, vec!["Romance"]);
    }
}
