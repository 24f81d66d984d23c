//! Recommendation endpoints
//!
//! The whole catalog is loaded per request and ranked in memory.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chordbook_common::{db, recommend, similar_to, trending, RecommendationQuery};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::params::{parse_preferences, required_chords, resolve_limit};
use super::ApiError;
use crate::AppState;

/// Query parameters for chord recommendations
#[derive(Debug, Deserialize)]
pub struct ChordRecommendationQuery {
    /// Comma-separated chord names
    pub chords: Option<String>,
    pub limit: Option<i64>,
    /// Comma-separated favorite genres
    pub genres: Option<String>,
    pub skill_level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

/// GET /api/recommendations/chords?chords=G,C,D&limit=5&genres=Folk&skill_level=Beginner
pub async fn recommend_by_chords(
    State(state): State<AppState>,
    Query(params): Query<ChordRecommendationQuery>,
) -> Result<Json<Value>, ApiError> {
    let search_chords = required_chords(params.chords.as_deref())?;
    let limit = resolve_limit(params.limit, state.limits.recommendations)?;

    let mut query = RecommendationQuery::new(search_chords, limit);
    if let Some(preferences) =
        parse_preferences(params.genres.as_deref(), params.skill_level.as_deref())?
    {
        query = query.with_preferences(preferences);
    }

    let songs = db::list_songs(&state.db).await?;
    let recommendations = recommend(&songs, &query)?;
    let count = recommendations.len();

    Ok(Json(json!({
        "recommendations": recommendations,
        "search_chords": query.search_chords,
        "count": count,
    })))
}

/// GET /api/recommendations/trending?limit=10
pub async fn trending_songs(
    State(state): State<AppState>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<Value>, ApiError> {
    let limit = resolve_limit(params.limit, state.limits.trending)?;

    let songs = db::list_songs(&state.db).await?;
    let ranked = trending(&songs, limit);
    let count = ranked.len();

    Ok(Json(json!({
        "trending": ranked,
        "count": count,
    })))
}

/// GET /api/recommendations/similar/:song_id?limit=5
///
/// Unknown ids answer with an empty list.
pub async fn similar_songs(
    State(state): State<AppState>,
    Path(song_id): Path<String>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<Value>, ApiError> {
    let limit = resolve_limit(params.limit, state.limits.similar)?;

    let songs = db::list_songs(&state.db).await?;
    let similar = similar_to(&songs, &song_id, limit)?;
    let count = similar.len();
    debug!("Similar to {}: {} songs", song_id, count);

    Ok(Json(json!({
        "similar": similar,
        "count": count,
    })))
}
