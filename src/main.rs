use std::sync::Arc;

use moodflix_api::{
    config::Config,
    db::{self, PgStore},
    routes::create_router,
    services::{GeminiClassifier, GenreVocabulary, TmdbCatalog},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodflix_api=debug,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Connected to PostgreSQL");

    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY not set; mood classification will use default genres");
    }
    if config.tmdb_api_key.is_none() {
        tracing::warn!("TMDB_API_KEY not set; movie discovery will fail");
    }

    let state = AppState {
        classifier: Arc::new(GeminiClassifier::new(
            config.gemini_api_key.clone(),
            config.gemini_api_url.clone(),
            config.gemini_model.clone(),
        )),
        catalog: Arc::new(TmdbCatalog::new(
            config.tmdb_api_key.clone(),
            config.tmdb_base_url.clone(),
            GenreVocabulary::standard(),
        )),
        store: Arc::new(PgStore::new(pool)),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "MoodFlix API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
