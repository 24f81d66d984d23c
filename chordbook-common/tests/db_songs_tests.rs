//! Integration tests for the SQLite song store
//!
//! Each test works on its own database inside a temporary directory.

use chordbook_common::catalog::CatalogFilter;
use chordbook_common::db::{self, init_database};
use chordbook_common::models::{Difficulty, NewSong};
use chordbook_common::ranking::{recommend, RecommendationQuery};
use chordbook_common::Song;
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn setup() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("Should create temp dir");
    let pool = init_database(&dir.path().join("nested").join("chordbook.db"))
        .await
        .expect("Should initialize database");
    (dir, pool)
}

fn new_song(title: &str, chords: &[&str], genre: &str, difficulty: Difficulty) -> NewSong {
    NewSong {
        title: title.to_string(),
        artist: "Test Artist".to_string(),
        chords: chords.iter().map(|c| c.to_string()).collect(),
        key: "G".to_string(),
        difficulty: Some(difficulty),
        genre: genre.to_string(),
        tempo: 100,
        rating: 3.0,
        ..Default::default()
    }
}

async fn insert(pool: &SqlitePool, id: &str, song: NewSong) -> Song {
    let song = song.into_song(id.to_string(), None).expect("Valid song");
    db::insert_song(pool, &song).await.expect("Insert should succeed");
    song
}

#[tokio::test]
async fn test_init_creates_database_file_and_reopens() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("chordbook.db");

    let pool = init_database(&db_path).await.expect("First init");
    assert!(db_path.exists());
    drop(pool);

    let pool = init_database(&db_path).await.expect("Second init on existing db");
    assert_eq!(db::list_songs(&pool).await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_insert_and_get_round_trip() {
    let (_dir, pool) = setup().await;
    let mut new = new_song("Round Trip", &["G", "C", "D"], "Folk", Difficulty::Beginner);
    new.lyrics_text = Some("[Chorus]\nla la".to_string());
    let song = insert(&pool, "song-1", new).await;

    let loaded = db::get_song(&pool, "song-1").await.unwrap().expect("Song exists");
    assert_eq!(loaded.title, song.title);
    assert_eq!(loaded.chords, song.chords);
    assert_eq!(loaded.difficulty, Difficulty::Beginner);
    assert_eq!(loaded.lyrics_with_chords, song.lyrics_with_chords);
    assert_eq!(loaded.tuning, "Standard");

    assert!(db::get_song(&pool, "missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_songs_preserves_insertion_order() {
    let (_dir, pool) = setup().await;
    for (id, title) in [("c", "Third"), ("a", "First"), ("b", "Second")] {
        insert(&pool, id, new_song(title, &["G"], "Folk", Difficulty::Beginner)).await;
    }

    let ids: Vec<String> = db::list_songs(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[tokio::test]
async fn test_update_and_delete() {
    let (_dir, pool) = setup().await;
    let mut song = insert(&pool, "s", new_song("Before", &["G"], "Folk", Difficulty::Beginner)).await;

    song.title = "After".to_string();
    song.rating = 4.5;
    assert!(db::update_song(&pool, &song).await.unwrap());
    let loaded = db::get_song(&pool, "s").await.unwrap().unwrap();
    assert_eq!(loaded.title, "After");
    assert_eq!(loaded.rating, 4.5);

    song.id = "other".to_string();
    assert!(!db::update_song(&pool, &song).await.unwrap());

    assert!(db::delete_song(&pool, "s").await.unwrap());
    assert!(!db::delete_song(&pool, "s").await.unwrap());
    assert!(db::get_song(&pool, "s").await.unwrap().is_none());
}

#[tokio::test]
async fn test_increment_search_counts() {
    let (_dir, pool) = setup().await;
    insert(&pool, "a", new_song("A", &["G"], "Folk", Difficulty::Beginner)).await;
    insert(&pool, "b", new_song("B", &["C"], "Folk", Difficulty::Beginner)).await;

    let ids = vec!["a".to_string(), "missing".to_string()];
    assert_eq!(db::increment_search_counts(&pool, &ids).await.unwrap(), 1);
    assert_eq!(db::increment_search_counts(&pool, &ids).await.unwrap(), 1);
    assert_eq!(db::increment_search_counts(&pool, &[]).await.unwrap(), 0);

    let a = db::get_song(&pool, "a").await.unwrap().unwrap();
    let b = db::get_song(&pool, "b").await.unwrap().unwrap();
    assert_eq!(a.search_count, 2);
    assert_eq!(b.search_count, 0);
}

#[tokio::test]
async fn test_filtered_pages_and_counts() {
    let (_dir, pool) = setup().await;
    insert(&pool, "f1", new_song("Folk 1", &["G"], "Folk", Difficulty::Beginner)).await;
    insert(&pool, "r1", new_song("Rock 1", &["E"], "Rock", Difficulty::Advanced)).await;
    insert(&pool, "f2", new_song("Folk 2", &["C"], "Folk", Difficulty::Advanced)).await;

    let folk = CatalogFilter {
        genre: Some("Folk".to_string()),
        ..Default::default()
    };
    assert_eq!(db::count_songs(&pool, &folk).await.unwrap(), 2);
    assert_eq!(db::count_songs(&pool, &CatalogFilter::default()).await.unwrap(), 3);

    let page = db::list_page(&pool, &folk, 1, 0).await.unwrap();
    assert_eq!(page.len(), 1);
    let second = db::list_page(&pool, &folk, 1, 1).await.unwrap();
    assert_eq!(second.len(), 1);
    assert_ne!(page[0].id, second[0].id);

    let advanced_folk = CatalogFilter {
        genre: Some("Folk".to_string()),
        difficulty: Some(Difficulty::Advanced),
        key: Some("G".to_string()),
    };
    let found = db::list_page(&pool, &advanced_folk, 10, 0).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "f2");
}

#[tokio::test]
async fn test_seeded_catalog_feeds_ranking() {
    let (_dir, pool) = setup().await;
    let inserted = db::sample::seed_sample_songs(&pool).await.unwrap();
    assert_eq!(inserted, db::sample::sample_songs().len());

    // seeding twice replaces rather than duplicates
    db::sample::seed_sample_songs(&pool).await.unwrap();
    let songs = db::list_songs(&pool).await.unwrap();
    assert_eq!(songs.len(), inserted);

    let query = RecommendationQuery::new(vec!["G".into(), "D".into(), "Em".into(), "C".into()], 3);
    let results = recommend(&songs, &query).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].song.title, "Demo Folk Song");
    assert_eq!(results[0].exact_matches, 4);
}
