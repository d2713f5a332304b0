use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::{
    db::MovieStore,
    error::AppResult,
    models::{Favourite, NewFavourite, SearchEntry, DEMO_USER_ID},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// PostgreSQL-backed favourites and search-history store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MovieStore for PgStore {
    async fn add_favourite(&self, favourite: NewFavourite) -> AppResult<Favourite> {
        let row = sqlx::query_as::<_, Favourite>(
            r#"
            INSERT INTO favourites
                (id, user_id, catalog_id, title, overview, poster_path, rating, release_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, catalog_id, title, overview, poster_path, rating, release_date, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(DEMO_USER_ID)
        .bind(favourite.catalog_id)
        .bind(&favourite.title)
        .bind(&favourite.overview)
        .bind(&favourite.poster_path)
        .bind(favourite.rating)
        .bind(&favourite.release_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(catalog_id = row.catalog_id, title = %row.title, "Favourite saved");

        Ok(row)
    }

    async fn list_favourites(&self) -> AppResult<Vec<Favourite>> {
        let rows = sqlx::query_as::<_, Favourite>(
            r#"
            SELECT id, user_id, catalog_id, title, overview, poster_path, rating, release_date, created_at
            FROM favourites
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(DEMO_USER_ID)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn add_search(&self, mood: &str, genres: &[String]) -> AppResult<SearchEntry> {
        let row = sqlx::query_as::<_, SearchEntry>(
            r#"
            INSERT INTO searches (id, user_id, mood, genres, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, mood, genres, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(DEMO_USER_ID)
        .bind(mood)
        .bind(genres)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(mood = %row.mood, genres = ?row.genres, "Search recorded");

        Ok(row)
    }

    async fn recent_searches(&self, limit: i64) -> AppResult<Vec<SearchEntry>> {
        let rows = sqlx::query_as::<_, SearchEntry>(
            r#"
            SELECT id, user_id, mood, genres, created_at
            FROM searches
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(DEMO_USER_ID)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
