//! Lyrics endpoints
//!
//! Full song view with the arrangement laid out line by line, optionally
//! transposed, and partial updates of lyrics and structure.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chordbook_common::chords::transpose_chord;
use chordbook_common::db;
use chordbook_common::lyrics::{arrange, layout_line, transpose_sections, LineSegment};
use chordbook_common::models::{LyricsUpdate, SectionType};
use chordbook_common::Song;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct FullSongQuery {
    /// Semitones to shift every chord (negative shifts down)
    #[serde(default)]
    pub transpose: i32,
}

/// A section as played, with each line split into text and chord segments
#[derive(Debug, Serialize)]
pub struct PlayedSection {
    pub section_name: String,
    pub section_type: SectionType,
    pub repeat_index: u32,
    pub repeat_total: u32,
    pub lines: Vec<Vec<LineSegment>>,
}

#[derive(Debug, Serialize)]
pub struct FullSongResponse {
    pub song: Song,
    pub transpose: i32,
    pub arrangement: Vec<PlayedSection>,
}

/// GET /api/lyrics/song/:id/full?transpose=2
pub async fn get_full_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<FullSongQuery>,
) -> Result<Json<FullSongResponse>, ApiError> {
    let mut song = db::get_song(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::song_not_found(&id))?;

    if query.transpose != 0 {
        song.chords = song
            .chords
            .iter()
            .map(|c| transpose_chord(c, query.transpose))
            .collect();
        song.lyrics_with_chords = transpose_sections(&song.lyrics_with_chords, query.transpose);
    }

    let arrangement = arrange(&song)
        .into_iter()
        .map(|played| PlayedSection {
            section_name: played.section.section_name.clone(),
            section_type: played.section.section_type,
            repeat_index: played.repeat_index,
            repeat_total: played.repeat_total,
            lines: played
                .section
                .lines
                .iter()
                .map(|line| layout_line(line, 0))
                .collect(),
        })
        .collect();

    Ok(Json(FullSongResponse {
        song,
        transpose: query.transpose,
        arrangement,
    }))
}

/// PUT /api/lyrics/song/:id/lyrics
pub async fn update_lyrics(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<LyricsUpdate>,
) -> Result<Json<Song>, ApiError> {
    let mut song = db::get_song(&state.db, &id)
        .await?
        .ok_or_else(|| ApiError::song_not_found(&id))?;

    update.apply_to(&mut song);
    if !db::update_song(&state.db, &song).await? {
        return Err(ApiError::song_not_found(&id));
    }
    info!(
        "Updated lyrics for song {} ({} sections)",
        id,
        song.lyrics_with_chords.len()
    );
    Ok(Json(song))
}
