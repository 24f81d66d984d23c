//! Database initialization
//!
//! Opens (creating if needed) the SQLite database and ensures the schema
//! exists. Safe to call on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets readers proceed while a search-count update is written
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_songs_table(&pool).await?;

    Ok(pool)
}

async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            guid TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            chords TEXT NOT NULL DEFAULT '[]',
            song_key TEXT NOT NULL,
            difficulty TEXT NOT NULL,
            genre TEXT NOT NULL,
            tempo INTEGER NOT NULL,
            lyrics_with_chords TEXT NOT NULL DEFAULT '[]',
            song_structure TEXT NOT NULL DEFAULT '[]',
            capo_position INTEGER NOT NULL DEFAULT 0,
            tuning TEXT NOT NULL DEFAULT 'Standard',
            strumming_pattern TEXT NOT NULL DEFAULT '',
            lyrics_source TEXT NOT NULL DEFAULT 'User contributed',
            copyright_info TEXT NOT NULL DEFAULT '',
            search_count INTEGER NOT NULL DEFAULT 0,
            rating REAL NOT NULL DEFAULT 0.0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (difficulty IN ('Beginner', 'Intermediate', 'Advanced')),
            CHECK (rating >= 0.0 AND rating <= 5.0),
            CHECK (search_count >= 0),
            CHECK (tempo > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_genre ON songs(genre)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_difficulty ON songs(difficulty)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_created_at ON songs(created_at)")
        .execute(pool)
        .await?;

    Ok(())
}
