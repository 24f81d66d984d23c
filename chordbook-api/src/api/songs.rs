//! Song catalog endpoints
//!
//! Paginated listing with attribute filters, plain chord search, and CRUD.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chordbook_common::catalog::{search_by_chords, CatalogFilter, ChordMatchMode};
use chordbook_common::db;
use chordbook_common::models::NewSong;
use chordbook_common::Song;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use super::params::{parse_difficulty, required_chords, resolve_limit};
use super::ApiError;
use crate::pagination::calculate_pagination;
use crate::AppState;

/// Query parameters for catalog listing
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,
    /// Page size; defaults to `limits.page_size`
    pub limit: Option<i64>,
    pub genre: Option<String>,
    pub difficulty: Option<String>,
    pub key: Option<String>,
}

fn default_page() -> i64 {
    1
}

/// One page of the catalog
#[derive(Debug, Serialize)]
pub struct SongListResponse {
    pub songs: Vec<Song>,
    pub total: i64,
    pub current_page: i64,
    pub total_pages: i64,
    pub page_size: i64,
}

/// GET /api/songs?page=1&limit=20&genre=Folk&difficulty=Beginner&key=G
pub async fn list_songs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<SongListResponse>, ApiError> {
    let page_size = resolve_limit(query.limit, state.limits.page_size)? as i64;
    let filter = CatalogFilter {
        genre: non_empty(query.genre),
        difficulty: parse_difficulty(query.difficulty.as_deref())?,
        key: non_empty(query.key),
    };

    let total = db::count_songs(&state.db, &filter).await?;
    let pagination = calculate_pagination(total, query.page, page_size);
    let songs = db::list_page(&state.db, &filter, pagination.page_size, pagination.offset).await?;

    Ok(Json(SongListResponse {
        songs,
        total,
        current_page: pagination.page,
        total_pages: pagination.total_pages,
        page_size: pagination.page_size,
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Query parameters for chord search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Comma-separated chord names
    pub chords: Option<String>,
    /// Require every chord instead of any
    #[serde(default)]
    pub exact: bool,
}

/// Chord search result
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub songs: Vec<Song>,
    pub search_chords: Vec<String>,
}

/// GET /api/songs/search?chords=G,C,D&exact=false
///
/// Every returned song has its search count incremented. The response shows
/// the counts as they were before this search.
pub async fn search_songs(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let search_chords = required_chords(query.chords.as_deref())?;
    let mode = ChordMatchMode::from_exact_flag(query.exact);

    let catalog = db::list_songs(&state.db).await?;
    let songs: Vec<Song> = search_by_chords(&catalog, &search_chords, mode)
        .into_iter()
        .cloned()
        .collect();

    let ids: Vec<String> = songs.iter().map(|s| s.id.clone()).collect();
    let updated = db::increment_search_counts(&state.db, &ids).await?;
    debug!("Chord search {:?} ({:?}) matched {} songs", search_chords, mode, updated);

    Ok(Json(SearchResponse {
        songs,
        search_chords,
    }))
}

/// GET /api/songs/:id
pub async fn get_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Song>, ApiError> {
    db::get_song(&state.db, &id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::song_not_found(&id))
}

/// POST /api/songs
pub async fn create_song(
    State(state): State<AppState>,
    Json(payload): Json<NewSong>,
) -> Result<(StatusCode, Json<Song>), ApiError> {
    let song = payload.into_song(Uuid::new_v4().to_string(), None)?;
    db::insert_song(&state.db, &song).await?;
    info!("Created song {} ({} - {})", song.id, song.artist, song.title);
    Ok((StatusCode::CREATED, Json(song)))
}

/// PUT /api/songs/:id
///
/// Full replace. Creation time and (unless given) search count are kept.
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NewSong>,
) -> Result<Json<Song>, ApiError> {
    let existing = db::get_song(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::song_not_found(&id))?;

    let song = payload.into_song(id.clone(), Some(&existing))?;
    if !db::update_song(&state.db, &song).await? {
        return Err(ApiError::song_not_found(&id));
    }
    info!("Updated song {}", id);
    Ok(Json(song))
}

/// DELETE /api/songs/:id
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !db::delete_song(&state.db, &id).await? {
        return Err(ApiError::song_not_found(&id));
    }
    info!("Deleted song {}", id);
    Ok(Json(json!({
        "message": "Song deleted successfully",
    })))
}
