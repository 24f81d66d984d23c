//! chordbook-api library - HTTP surface of the guitar song catalog
//!
//! Thin request layer: parses query parameters, fetches songs from the
//! SQLite store, and hands them to the scoring/ranking core in
//! `chordbook-common`.

use axum::Router;
use chordbook_common::config::LimitsConfig;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod pagination;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Default result sizes for requests without `limit`
    pub limits: LimitsConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, limits: LimitsConfig) -> Self {
        Self { db, limits }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, put};

    let songs = Router::new()
        .route("/api/songs", get(api::list_songs).post(api::create_song))
        .route("/api/songs/search", get(api::search_songs))
        .route(
            "/api/songs/:id",
            get(api::get_song).put(api::update_song).delete(api::delete_song),
        );

    let lyrics = Router::new()
        .route("/api/lyrics/song/:id/full", get(api::get_full_song))
        .route("/api/lyrics/song/:id/lyrics", put(api::update_lyrics));

    let recommendations = Router::new()
        .route("/api/recommendations/chords", get(api::recommend_by_chords))
        .route("/api/recommendations/trending", get(api::trending_songs))
        .route("/api/recommendations/similar/:song_id", get(api::similar_songs));

    Router::new()
        .merge(songs)
        .merge(lyrics)
        .merge(recommendations)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
