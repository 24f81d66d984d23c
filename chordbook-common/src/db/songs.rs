//! Song table queries
//!
//! List-valued fields (chords, lyrics sections, arrangement) are stored as
//! JSON text columns.

use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::debug;

use crate::catalog::CatalogFilter;
use crate::models::{Difficulty, Song};
use crate::{Error, Result};

const SONG_COLUMNS: &str = "guid, title, artist, chords, song_key, difficulty, genre, tempo, \
     lyrics_with_chords, song_structure, capo_position, tuning, strumming_pattern, \
     lyrics_source, copyright_info, search_count, rating, created_at";

fn column_u32(row: &SqliteRow, column: &str) -> Result<u32> {
    let value: i64 = row.try_get(column)?;
    u32::try_from(value)
        .map_err(|_| Error::Internal(format!("Column {} out of range: {}", column, value)))
}

fn song_from_row(row: &SqliteRow) -> Result<Song> {
    let difficulty: String = row.try_get("difficulty")?;
    let difficulty = Difficulty::from_str(&difficulty)
        .ok_or_else(|| Error::Internal(format!("Unknown difficulty '{}' in songs table", difficulty)))?;

    let chords: String = row.try_get("chords")?;
    let lyrics: String = row.try_get("lyrics_with_chords")?;
    let structure: String = row.try_get("song_structure")?;
    let search_count: i64 = row.try_get("search_count")?;

    Ok(Song {
        id: row.try_get("guid")?,
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        chords: serde_json::from_str(&chords)?,
        key: row.try_get("song_key")?,
        difficulty,
        genre: row.try_get("genre")?,
        tempo: column_u32(row, "tempo")?,
        lyrics_with_chords: serde_json::from_str(&lyrics)?,
        song_structure: serde_json::from_str(&structure)?,
        capo_position: column_u32(row, "capo_position")?,
        tuning: row.try_get("tuning")?,
        strumming_pattern: row.try_get("strumming_pattern")?,
        lyrics_source: row.try_get("lyrics_source")?,
        copyright_info: row.try_get("copyright_info")?,
        search_count: search_count.max(0) as u64,
        rating: row.try_get("rating")?,
        created_at: row.try_get("created_at")?,
    })
}

fn push_filter<'a>(qb: &mut QueryBuilder<'a, Sqlite>, filter: &'a CatalogFilter) {
    qb.push(" WHERE 1 = 1");
    if let Some(genre) = &filter.genre {
        qb.push(" AND genre = ").push_bind(genre.as_str());
    }
    if let Some(difficulty) = filter.difficulty {
        qb.push(" AND difficulty = ").push_bind(difficulty.to_db_string());
    }
    if let Some(key) = &filter.key {
        qb.push(" AND song_key = ").push_bind(key.as_str());
    }
}

/// Every song, in insertion order
///
/// This is the collection handed to the ranking pipeline; its order is the
/// tie-break for equal scores.
pub async fn list_songs(pool: &SqlitePool) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!("SELECT {} FROM songs ORDER BY rowid ASC", SONG_COLUMNS))
        .fetch_all(pool)
        .await?;
    rows.iter().map(song_from_row).collect()
}

/// One page of songs matching `filter`, newest first
pub async fn list_page(
    pool: &SqlitePool,
    filter: &CatalogFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<Song>> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM songs", SONG_COLUMNS));
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY created_at DESC, rowid DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let rows = qb.build().fetch_all(pool).await?;
    rows.iter().map(song_from_row).collect()
}

/// Number of songs matching `filter`
pub async fn count_songs(pool: &SqlitePool, filter: &CatalogFilter) -> Result<i64> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM songs");
    push_filter(&mut qb, filter);
    let count: i64 = qb.build_query_scalar().fetch_one(pool).await?;
    Ok(count)
}

pub async fn get_song(pool: &SqlitePool, id: &str) -> Result<Option<Song>> {
    let row = sqlx::query(&format!("SELECT {} FROM songs WHERE guid = ?", SONG_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(song_from_row).transpose()
}

pub async fn insert_song(pool: &SqlitePool, song: &Song) -> Result<()> {
    sqlx::query(&format!(
        "INSERT INTO songs ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        SONG_COLUMNS
    ))
    .bind(&song.id)
    .bind(&song.title)
    .bind(&song.artist)
    .bind(serde_json::to_string(&song.chords)?)
    .bind(&song.key)
    .bind(song.difficulty.to_db_string())
    .bind(&song.genre)
    .bind(i64::from(song.tempo))
    .bind(serde_json::to_string(&song.lyrics_with_chords)?)
    .bind(serde_json::to_string(&song.song_structure)?)
    .bind(i64::from(song.capo_position))
    .bind(&song.tuning)
    .bind(&song.strumming_pattern)
    .bind(&song.lyrics_source)
    .bind(&song.copyright_info)
    .bind(search_count_column(song.search_count))
    .bind(song.rating)
    .bind(song.created_at)
    .execute(pool)
    .await?;

    debug!("Inserted song {} ({})", song.id, song.title);
    Ok(())
}

/// Overwrite every stored field of an existing song
///
/// Returns `false` if no song has that id.
pub async fn update_song(pool: &SqlitePool, song: &Song) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE songs SET title = ?, artist = ?, chords = ?, song_key = ?, difficulty = ?, \
         genre = ?, tempo = ?, lyrics_with_chords = ?, song_structure = ?, capo_position = ?, \
         tuning = ?, strumming_pattern = ?, lyrics_source = ?, copyright_info = ?, \
         search_count = ?, rating = ? WHERE guid = ?",
    )
    .bind(&song.title)
    .bind(&song.artist)
    .bind(serde_json::to_string(&song.chords)?)
    .bind(&song.key)
    .bind(song.difficulty.to_db_string())
    .bind(&song.genre)
    .bind(i64::from(song.tempo))
    .bind(serde_json::to_string(&song.lyrics_with_chords)?)
    .bind(serde_json::to_string(&song.song_structure)?)
    .bind(i64::from(song.capo_position))
    .bind(&song.tuning)
    .bind(&song.strumming_pattern)
    .bind(&song.lyrics_source)
    .bind(&song.copyright_info)
    .bind(search_count_column(song.search_count))
    .bind(song.rating)
    .bind(&song.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Returns `false` if no song has that id
pub async fn delete_song(pool: &SqlitePool, id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM songs WHERE guid = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Remove every song; returns the number deleted
pub async fn delete_all_songs(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM songs").execute(pool).await?;
    Ok(result.rows_affected())
}

/// Add one to the search count of each listed song
///
/// Issued by the request layer after a chord search has produced its result.
/// Runs in a single transaction; unknown ids are ignored. Returns the number
/// of songs updated.
pub async fn increment_search_counts(pool: &SqlitePool, ids: &[String]) -> Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut updated = 0;
    for id in ids {
        updated += sqlx::query("UPDATE songs SET search_count = search_count + 1 WHERE guid = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }
    tx.commit().await?;

    debug!("Incremented search count of {} songs", updated);
    Ok(updated)
}

fn search_count_column(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
