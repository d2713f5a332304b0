pub mod postgres;

pub use postgres::create_pool;
pub use postgres::PgStore;

use crate::{
    error::AppResult,
    models::{Favourite, NewFavourite, SearchEntry},
};

/// Persistence for favourites and search history
///
/// Everything is keyed by the single implicit user identity; there are no
/// accounts. Handlers depend on this trait so route tests can run against an
/// in-memory double instead of PostgreSQL.
#[async_trait::async_trait]
pub trait MovieStore: Send + Sync {
    /// Saves a favourite movie and returns the stored row
    async fn add_favourite(&self, favourite: NewFavourite) -> AppResult<Favourite>;

    /// Lists favourites, most recent first
    async fn list_favourites(&self) -> AppResult<Vec<Favourite>>;

    /// Records a mood search and the genres it resolved to
    async fn add_search(&self, mood: &str, genres: &[String]) -> AppResult<SearchEntry>;

    /// Lists past searches, most recent first, capped at `limit`
    async fn recent_searches(&self, limit: i64) -> AppResult<Vec<SearchEntry>>;
}
