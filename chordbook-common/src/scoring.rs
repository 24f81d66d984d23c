//! Similarity and scoring
//!
//! Scores one song against a chord query:
//!
//! ```text
//! score = 0.4 × chord_similarity      (Jaccard over case-folded chord sets)
//!       + 0.3 × popularity_score      (0.4 × min(searches/100, 1) + 0.6 × rating/5)
//!       + 0.2 × exact_match_bonus     (query chords found in the song / query length)
//!       + 0.2 if the genre is a favorite
//!       + 0.1 if the difficulty equals the preferred skill level
//! ```
//!
//! The total is deliberately not normalized; preference bonuses can push a
//! score above 1.0.

use serde::{Deserialize, Serialize};

use crate::chords::ChordSet;
use crate::models::{Difficulty, Song, MAX_RATING};
use crate::{Error, Result};

/// Weight of the Jaccard chord similarity
pub const CHORD_SIMILARITY_WEIGHT: f64 = 0.4;
/// Weight of the popularity score
pub const POPULARITY_WEIGHT: f64 = 0.3;
/// Weight of the exact match ratio
pub const EXACT_MATCH_WEIGHT: f64 = 0.2;
/// Flat bonus when the song's genre is a favorite
pub const GENRE_BONUS: f64 = 0.2;
/// Flat bonus when the song's difficulty matches the skill level
pub const DIFFICULTY_BONUS: f64 = 0.1;

/// Search count at which the search component of popularity saturates
const SEARCH_COUNT_SATURATION: f64 = 100.0;
const SEARCH_COUNT_WEIGHT: f64 = 0.4;
const RATING_WEIGHT: f64 = 0.6;

/// Optional per-user signals that add flat bonuses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Exact (case-sensitive) genre names
    #[serde(default)]
    pub favorite_genres: Vec<String>,
    #[serde(default)]
    pub skill_level: Option<Difficulty>,
}

impl UserPreferences {
    pub fn genre_bonus(&self, song: &Song) -> f64 {
        if self.favorite_genres.iter().any(|g| *g == song.genre) {
            GENRE_BONUS
        } else {
            0.0
        }
    }

    pub fn difficulty_bonus(&self, song: &Song) -> f64 {
        if self.skill_level == Some(song.difficulty) {
            DIFFICULTY_BONUS
        } else {
            0.0
        }
    }
}

/// Every component of one song's score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub chord_similarity: f64,
    pub exact_matches: usize,
    pub exact_match_bonus: f64,
    pub popularity_score: f64,
    pub genre_bonus: f64,
    pub difficulty_bonus: f64,
}

/// Jaccard similarity between query and song chord sets (`0.0` if both empty)
pub fn chord_similarity(query: &ChordSet, song: &ChordSet) -> f64 {
    query.jaccard(song)
}

/// Popularity in `[0, 1]` from search count and rating
///
/// Monotonically non-decreasing in both inputs. Ratings outside `[0, 5]` are
/// clamped first.
pub fn popularity_score(search_count: u64, rating: f64) -> f64 {
    let normalized_searches = (search_count as f64 / SEARCH_COUNT_SATURATION).min(1.0);
    let normalized_rating = if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, MAX_RATING) / MAX_RATING
    };
    SEARCH_COUNT_WEIGHT * normalized_searches + RATING_WEIGHT * normalized_rating
}

/// Query chords (with their original casing, duplicates kept) that appear in
/// the song
pub fn matching_chords(search_chords: &[String], song_chords: &ChordSet) -> Vec<String> {
    search_chords
        .iter()
        .filter(|chord| song_chords.contains(chord))
        .cloned()
        .collect()
}

/// Number of query chords (duplicates counted) that appear in the song
pub fn exact_matches(search_chords: &[String], song_chords: &ChordSet) -> usize {
    search_chords
        .iter()
        .filter(|chord| song_chords.contains(chord))
        .count()
}

/// Scores songs against one chord query
///
/// Normalizes the query once; each call to [`Scorer::score`] only folds the
/// song's own chords.
#[derive(Debug, Clone)]
pub struct Scorer<'q> {
    search_chords: &'q [String],
    query_set: ChordSet,
    preferences: Option<&'q UserPreferences>,
}

impl<'q> Scorer<'q> {
    /// Build a scorer; fails with `InvalidArgument` on an empty chord query
    pub fn new(
        search_chords: &'q [String],
        preferences: Option<&'q UserPreferences>,
    ) -> Result<Self> {
        if search_chords.is_empty() {
            return Err(Error::invalid("search chords must not be empty"));
        }
        Ok(Self {
            search_chords,
            query_set: ChordSet::from_chords(search_chords),
            preferences,
        })
    }

    pub fn search_chords(&self) -> &'q [String] {
        self.search_chords
    }

    /// Score one song
    pub fn score(&self, song: &Song) -> ScoreBreakdown {
        let song_set = ChordSet::from_chords(&song.chords);

        let chord_similarity = chord_similarity(&self.query_set, &song_set);
        let popularity_score = popularity_score(song.search_count, song.rating);
        let exact_matches = exact_matches(self.search_chords, &song_set);
        let exact_match_bonus = exact_matches as f64 / self.search_chords.len() as f64;

        let (genre_bonus, difficulty_bonus) = match self.preferences {
            Some(prefs) => (prefs.genre_bonus(song), prefs.difficulty_bonus(song)),
            None => (0.0, 0.0),
        };

        let score = CHORD_SIMILARITY_WEIGHT * chord_similarity
            + POPULARITY_WEIGHT * popularity_score
            + EXACT_MATCH_WEIGHT * exact_match_bonus
            + genre_bonus
            + difficulty_bonus;

        ScoreBreakdown {
            score,
            chord_similarity,
            exact_matches,
            exact_match_bonus,
            popularity_score,
            genre_bonus,
            difficulty_bonus,
        }
    }

    /// Query chords found in the song, in query order
    pub fn matching_chords(&self, song: &Song) -> Vec<String> {
        matching_chords(self.search_chords, &ChordSet::from_chords(&song.chords))
    }
}

/// Score a single song (convenience wrapper around [`Scorer`])
pub fn score_song(
    search_chords: &[String],
    song: &Song,
    preferences: Option<&UserPreferences>,
) -> Result<ScoreBreakdown> {
    Ok(Scorer::new(search_chords, preferences)?.score(song))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn chords(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    fn song(chord_list: &[&str], search_count: u64, rating: f64) -> Song {
        Song {
            id: "s".to_string(),
            title: "T".to_string(),
            artist: "A".to_string(),
            chords: chords(chord_list),
            key: "G".to_string(),
            difficulty: Difficulty::Beginner,
            genre: "Folk".to_string(),
            tempo: 100,
            lyrics_with_chords: Vec::new(),
            song_structure: Vec::new(),
            capo_position: 0,
            tuning: "Standard".to_string(),
            strumming_pattern: String::new(),
            lyrics_source: "User contributed".to_string(),
            copyright_info: String::new(),
            search_count,
            rating,
            created_at: Utc::now(),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_popularity_components() {
        assert!(approx(popularity_score(0, 0.0), 0.0));
        assert!(approx(popularity_score(50, 0.0), 0.2));
        assert!(approx(popularity_score(150, 4.5), 0.4 + 0.54));
        assert!(approx(popularity_score(1_000_000, 5.0), 1.0));
    }

    #[test]
    fn test_popularity_bounded_and_monotone() {
        let mut previous = popularity_score(0, 3.0);
        for count in [1, 10, 99, 100, 101, 10_000] {
            let current = popularity_score(count, 3.0);
            assert!(current >= previous);
            assert!((0.0..=1.0).contains(&current));
            previous = current;
        }

        let mut previous = popularity_score(20, 0.0);
        for rating in [0.5, 1.0, 2.5, 4.9, 5.0] {
            let current = popularity_score(20, rating);
            assert!(current >= previous);
            previous = current;
        }

        assert!(approx(popularity_score(0, 9.0), 0.6));
        assert!(approx(popularity_score(0, -1.0), 0.0));
        assert!(approx(popularity_score(0, f64::NAN), 0.0));
    }

    #[test]
    fn test_empty_query_is_invalid_argument() {
        let result = score_song(&[], &song(&["G"], 0, 0.0), None);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_score_reference_example() {
        let query = chords(&["G", "C", "D"]);
        let a = score_song(&query, &song(&["G", "C", "D", "Em"], 150, 4.5), None).unwrap();
        let b = score_song(&query, &song(&["F", "Bm"], 0, 0.0), None).unwrap();

        assert!(approx(a.chord_similarity, 0.75));
        assert_eq!(a.exact_matches, 3);
        assert!(approx(a.exact_match_bonus, 1.0));
        assert!(approx(a.score, 0.4 * 0.75 + 0.3 * 0.94 + 0.2));

        assert_eq!(b.chord_similarity, 0.0);
        assert_eq!(b.exact_matches, 0);
        assert_eq!(b.score, 0.0);
        assert!(a.score > b.score);
    }

    #[test]
    fn test_matching_is_case_insensitive_and_keeps_query_casing() {
        let query = chords(&["g", "EM", "g", "A7"]);
        let s = song(&["G", "Em", "C"], 0, 0.0);
        let scorer = Scorer::new(&query, None).unwrap();

        assert_eq!(scorer.matching_chords(&s), vec!["g", "EM", "g"]);
        let breakdown = scorer.score(&s);
        assert_eq!(breakdown.exact_matches, 3);
        assert!(approx(breakdown.exact_match_bonus, 0.75));
        // set semantics for Jaccard: {g, em, a7} vs {g, em, c}
        assert!(approx(breakdown.chord_similarity, 2.0 / 4.0));
    }

    #[test]
    fn test_matching_chords_never_longer_than_query() {
        let query = chords(&["G", "G", "C"]);
        let s = song(&["G", "C", "D", "Em", "Am"], 0, 0.0);
        assert!(Scorer::new(&query, None).unwrap().matching_chords(&s).len() <= query.len());
    }

    #[test]
    fn test_song_without_chords_scores_zero_similarity() {
        let query = chords(&["G"]);
        let breakdown = score_song(&query, &song(&[], 0, 0.0), None).unwrap();
        assert_eq!(breakdown.chord_similarity, 0.0);
        assert_eq!(breakdown.exact_matches, 0);
    }

    #[test]
    fn test_preference_bonuses_can_exceed_one() {
        let query = chords(&["G", "C", "D"]);
        let prefs = UserPreferences {
            favorite_genres: vec!["Folk".to_string()],
            skill_level: Some(Difficulty::Beginner),
        };
        let s = song(&["G", "C", "D"], 500, 5.0);
        let breakdown = score_song(&query, &s, Some(&prefs)).unwrap();

        assert!(approx(breakdown.genre_bonus, GENRE_BONUS));
        assert!(approx(breakdown.difficulty_bonus, DIFFICULTY_BONUS));
        assert!(approx(breakdown.score, 0.4 + 0.3 + 0.2 + 0.2 + 0.1));
        assert!(breakdown.score > 1.0);
    }

    #[test]
    fn test_genre_preference_is_exact() {
        let prefs = UserPreferences {
            favorite_genres: vec!["folk".to_string()],
            skill_level: Some(Difficulty::Advanced),
        };
        let s = song(&["G"], 0, 0.0);
        assert_eq!(prefs.genre_bonus(&s), 0.0);
        assert_eq!(prefs.difficulty_bonus(&s), 0.0);
    }
}
