pub mod catalog;
pub mod genres;
pub mod mood;
pub mod recommendation;

pub use catalog::{MovieCatalog, TmdbCatalog};
pub use genres::GenreVocabulary;
pub use mood::{GeminiClassifier, MoodClassifier};
pub use recommendation::{recommend, Recommendation};
