//! Ranking pipeline
//!
//! Runs the scorer over a whole song collection and returns the best matches.
//! The collection is supplied fully materialized by the caller; nothing here
//! touches storage or mutates songs.

use serde::Serialize;
use tracing::debug;

use crate::models::Song;
use crate::scoring::{ScoreBreakdown, Scorer, UserPreferences};
use crate::Result;

/// Parameters of a chord recommendation request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationQuery {
    /// Query chords, case-insensitive, order preserved in `matching_chords`
    pub search_chords: Vec<String>,
    /// Maximum number of results; `0` yields an empty result
    pub limit: usize,
    pub preferences: Option<UserPreferences>,
}

impl RecommendationQuery {
    pub fn new(search_chords: Vec<String>, limit: usize) -> Self {
        Self {
            search_chords,
            limit,
            preferences: None,
        }
    }

    pub fn with_preferences(mut self, preferences: UserPreferences) -> Self {
        self.preferences = Some(preferences);
        self
    }
}

/// A ranked song with its score components
///
/// Serializes as the song's own fields plus the scoring fields.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredResult<'a> {
    #[serde(flatten)]
    pub song: &'a Song,
    #[serde(rename = "recommendation_score")]
    pub score: f64,
    pub chord_similarity: f64,
    pub exact_matches: usize,
    pub popularity_score: f64,
    pub matching_chords: Vec<String>,
}

/// Rank `songs` against the query
///
/// Every song is scored, the list is sorted by score descending (a stable
/// sort, so equal scores keep collection order) and truncated to
/// `query.limit`. Fails with `InvalidArgument` when the query has no chords.
pub fn recommend<'a>(songs: &'a [Song], query: &RecommendationQuery) -> Result<Vec<ScoredResult<'a>>> {
    let scorer = Scorer::new(&query.search_chords, query.preferences.as_ref())?;

    let mut scored: Vec<(&'a Song, ScoreBreakdown)> =
        songs.iter().map(|song| (song, scorer.score(song))).collect();
    scored.sort_by(|(_, a), (_, b)| b.score.total_cmp(&a.score));
    scored.truncate(query.limit);

    debug!(
        "Ranked {} songs for {:?}, returning {}",
        songs.len(),
        query.search_chords,
        scored.len()
    );

    Ok(scored
        .into_iter()
        .map(|(song, breakdown)| ScoredResult {
            song,
            score: breakdown.score,
            chord_similarity: breakdown.chord_similarity,
            exact_matches: breakdown.exact_matches,
            popularity_score: breakdown.popularity_score,
            matching_chords: scorer.matching_chords(song),
        })
        .collect())
}

/// Most popular songs by `(search_count desc, rating desc)`; no scoring
pub fn trending(songs: &[Song], limit: usize) -> Vec<&Song> {
    let mut ranked: Vec<&Song> = songs.iter().collect();
    ranked.sort_by(|a, b| {
        b.search_count
            .cmp(&a.search_count)
            .then_with(|| b.rating.total_cmp(&a.rating))
    });
    ranked.truncate(limit);
    ranked
}

/// Songs sharing chords with the song identified by `song_id`
///
/// Uses the target's chords as the query, without preferences. The target
/// itself stays in the candidate set. An unknown id, or a target without
/// chords, yields an empty result rather than an error.
pub fn similar_to<'a>(songs: &'a [Song], song_id: &str, limit: usize) -> Result<Vec<ScoredResult<'a>>> {
    let Some(target) = songs.iter().find(|s| s.id == song_id) else {
        debug!("Similar-songs lookup for unknown song {}", song_id);
        return Ok(Vec::new());
    };

    if target.chords.is_empty() {
        debug!("Song {} has no chords, no similar songs", song_id);
        return Ok(Vec::new());
    }

    recommend(songs, &RecommendationQuery::new(target.chords.clone(), limit))
}
