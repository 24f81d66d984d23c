//! Sample catalog for first runs and demos

use sqlx::SqlitePool;
use tracing::info;

use super::songs::{delete_all_songs, insert_song};
use crate::models::{
    ChordPosition, Difficulty, LyricsLine, LyricsSection, NewSong, SectionType, Song,
    StructureEntry,
};
use crate::Result;

fn chord_list(chords: &[&str]) -> Vec<String> {
    chords.iter().map(|c| c.to_string()).collect()
}

fn line(text: &str, chords: &[(&str, usize)]) -> LyricsLine {
    LyricsLine {
        text: text.to_string(),
        chords: chords
            .iter()
            .map(|(chord, position)| ChordPosition {
                chord: chord.to_string(),
                position: *position,
            })
            .collect(),
    }
}

/// Sample songs with placeholder lyrics and chord positions
pub fn sample_songs() -> Vec<NewSong> {
    vec![
        NewSong {
            title: "Demo Folk Song".to_string(),
            artist: "Sample Artist".to_string(),
            chords: chord_list(&["G", "D", "Em", "C"]),
            key: "G".to_string(),
            difficulty: Some(Difficulty::Beginner),
            genre: "Folk".to_string(),
            tempo: 90,
            rating: 4.5,
            search_count: Some(150),
            capo_position: 2,
            strumming_pattern: "D-D-U-U-D-U".to_string(),
            lyrics_source: Some("Original composition for demo".to_string()),
            lyrics_with_chords: vec![
                LyricsSection {
                    section_type: SectionType::Verse,
                    section_name: "Verse 1".to_string(),
                    lines: vec![line(
                        "Walking down this old road today",
                        &[("Am", 0), ("F", 15)],
                    )],
                },
                LyricsSection {
                    section_type: SectionType::Chorus,
                    section_name: "Chorus".to_string(),
                    lines: vec![
                        line(
                            "We are young and we are free",
                            &[("C", 0), ("G", 10), ("Am", 20)],
                        ),
                        line(
                            "This is how we're meant to be",
                            &[("F", 0), ("C", 15), ("G", 25)],
                        ),
                    ],
                },
            ],
            song_structure: vec![
                StructureEntry {
                    section: "Verse 1".to_string(),
                    repeat: 1,
                },
                StructureEntry {
                    section: "Chorus".to_string(),
                    repeat: 2,
                },
            ],
            ..Default::default()
        },
        NewSong {
            title: "Campfire Waltz".to_string(),
            artist: "Sample Artist".to_string(),
            chords: chord_list(&["C", "G", "Am", "F"]),
            key: "C".to_string(),
            difficulty: Some(Difficulty::Beginner),
            genre: "Pop".to_string(),
            tempo: 84,
            rating: 4.0,
            search_count: Some(80),
            lyrics_text: Some("[Verse 1]\nSparks drift up into the night\n[Chorus]\nSing it once, sing it twice".to_string()),
            ..Default::default()
        },
        NewSong {
            title: "Twelve Bar Shuffle".to_string(),
            artist: "Demo Blues Band".to_string(),
            chords: chord_list(&["E7", "A7", "B7"]),
            key: "E".to_string(),
            difficulty: Some(Difficulty::Intermediate),
            genre: "Blues".to_string(),
            tempo: 110,
            rating: 3.5,
            search_count: Some(40),
            strumming_pattern: "Shuffle".to_string(),
            ..Default::default()
        },
        NewSong {
            title: "Minor Drift".to_string(),
            artist: "Sample Trio".to_string(),
            chords: chord_list(&["Am", "Dm", "E", "G", "C"]),
            key: "Am".to_string(),
            difficulty: Some(Difficulty::Intermediate),
            genre: "Rock".to_string(),
            tempo: 128,
            rating: 4.2,
            search_count: Some(12),
            ..Default::default()
        },
        NewSong {
            title: "Jazz Study No. 1".to_string(),
            artist: "Demo Quartet".to_string(),
            chords: chord_list(&["Dm7", "G7", "Cmaj7", "A7"]),
            key: "C".to_string(),
            difficulty: Some(Difficulty::Advanced),
            genre: "Jazz".to_string(),
            tempo: 140,
            rating: 3.8,
            search_count: Some(5),
            tuning: Some("Standard".to_string()),
            ..Default::default()
        },
    ]
}

/// Replace the whole catalog with the sample songs; returns the count inserted
pub async fn seed_sample_songs(pool: &SqlitePool) -> Result<usize> {
    let removed = delete_all_songs(pool).await?;
    info!("Cleared {} existing songs", removed);

    let mut inserted = 0;
    for new_song in sample_songs() {
        let song: Song = new_song.into_song(uuid::Uuid::new_v4().to_string(), None)?;
        insert_song(pool, &song).await?;
        inserted += 1;
    }

    info!("Inserted {} sample songs", inserted);
    Ok(inserted)
}
