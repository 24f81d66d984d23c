//! Catalog filtering
//!
//! Plain chord search (songs containing any / all of a chord list) and the
//! attribute filter used by paginated catalog listings.

use serde::{Deserialize, Serialize};

use crate::chords::ChordSet;
use crate::models::{Difficulty, Song};

/// How a chord search matches a song's chords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordMatchMode {
    /// Song contains at least one of the chords
    #[default]
    Any,
    /// Song contains every chord
    All,
}

impl ChordMatchMode {
    /// `exact=true` in a query string selects [`ChordMatchMode::All`]
    pub fn from_exact_flag(exact: bool) -> Self {
        if exact {
            ChordMatchMode::All
        } else {
            ChordMatchMode::Any
        }
    }
}

/// Songs whose chord list matches `chords` (case-insensitive), in
/// collection order
///
/// An empty chord list matches nothing.
pub fn search_by_chords<'a>(songs: &'a [Song], chords: &[String], mode: ChordMatchMode) -> Vec<&'a Song> {
    if chords.is_empty() {
        return Vec::new();
    }

    songs
        .iter()
        .filter(|song| {
            let song_chords = ChordSet::from_chords(&song.chords);
            match mode {
                ChordMatchMode::Any => chords.iter().any(|c| song_chords.contains(c)),
                ChordMatchMode::All => chords.iter().all(|c| song_chords.contains(c)),
            }
        })
        .collect()
}

/// Exact-match attribute filter for catalog listings
///
/// Unset fields do not constrain the result. Applied in SQL by
/// [`crate::db::list_page`] and [`crate::db::count_songs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub genre: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub key: Option<String>,
}
