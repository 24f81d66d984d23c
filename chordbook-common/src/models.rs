//! Song catalog models
//!
//! [`Song`] is the stored record. [`NewSong`] is the create/replace payload
//! accepted from clients and [`LyricsUpdate`] the partial lyrics edit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lyrics::parse_lyrics_text;
use crate::{Error, Result};

/// Highest rating a song can carry
pub const MAX_RATING: f64 = 5.0;

/// Playing difficulty of a song
///
/// Also used as the skill level in user preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Parse difficulty from a string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }

    /// Convert to database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    /// Get all difficulty variants, easiest first
    pub fn all_variants() -> &'static [Difficulty] {
        &[
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Advanced,
        ]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_string())
    }
}

/// Kind of a lyrics section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Verse,
    Chorus,
    Bridge,
    Intro,
    Outro,
    Instrumental,
}

impl SectionType {
    /// Infer the section type from a free-form header such as "Verse 2" or
    /// "Final Chorus"
    ///
    /// Checked in order chorus, verse, bridge, intro, outro; anything else is
    /// a verse. Instrumental sections are never inferred from a header.
    pub fn from_section_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.contains("chorus") {
            SectionType::Chorus
        } else if name.contains("verse") {
            SectionType::Verse
        } else if name.contains("bridge") {
            SectionType::Bridge
        } else if name.contains("intro") {
            SectionType::Intro
        } else if name.contains("outro") {
            SectionType::Outro
        } else {
            SectionType::Verse
        }
    }
}

/// A chord placed at a character offset within a lyrics line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordPosition {
    pub chord: String,
    /// Character (not byte) offset into the line text
    pub position: usize,
}

/// One line of lyrics with its chord annotations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsLine {
    pub text: String,
    #[serde(default)]
    pub chords: Vec<ChordPosition>,
}

impl LyricsLine {
    /// Plain text line without chords
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            chords: Vec::new(),
        }
    }
}

/// Named block of lyrics ("Verse 1", "Chorus", ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsSection {
    pub section_type: SectionType,
    pub section_name: String,
    #[serde(default)]
    pub lines: Vec<LyricsLine>,
}

/// Arrangement step: play the named section `repeat` times
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureEntry {
    /// Name of the referenced section (matches `LyricsSection::section_name`)
    #[serde(alias = "type")]
    pub section: String,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

fn default_repeat() -> u32 {
    1
}

fn default_tuning() -> String {
    "Standard".to_string()
}

fn default_lyrics_source() -> String {
    "User contributed".to_string()
}

/// A song in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub chords: Vec<String>,
    pub key: String,
    pub difficulty: Difficulty,
    pub genre: String,
    /// Beats per minute
    pub tempo: u32,
    #[serde(default)]
    pub lyrics_with_chords: Vec<LyricsSection>,
    #[serde(default)]
    pub song_structure: Vec<StructureEntry>,
    #[serde(default)]
    pub capo_position: u32,
    #[serde(default = "default_tuning")]
    pub tuning: String,
    #[serde(default)]
    pub strumming_pattern: String,
    #[serde(default = "default_lyrics_source")]
    pub lyrics_source: String,
    #[serde(default)]
    pub copyright_info: String,
    /// Number of chord searches that returned this song
    #[serde(default)]
    pub search_count: u64,
    /// User rating, 0.0 to 5.0
    #[serde(default)]
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

/// Create (or full replace) payload for a song
///
/// Either `lyrics_with_chords` or a raw `lyrics_text` block may be supplied;
/// the text is parsed into sections when no structured lyrics are given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub chords: Vec<String>,
    pub key: String,
    pub difficulty: Option<Difficulty>,
    pub genre: String,
    #[serde(default)]
    pub tempo: u32,
    #[serde(default)]
    pub lyrics_with_chords: Vec<LyricsSection>,
    #[serde(default)]
    pub lyrics_text: Option<String>,
    #[serde(default)]
    pub song_structure: Vec<StructureEntry>,
    #[serde(default)]
    pub capo_position: u32,
    #[serde(default)]
    pub tuning: Option<String>,
    #[serde(default)]
    pub strumming_pattern: String,
    #[serde(default)]
    pub lyrics_source: Option<String>,
    #[serde(default)]
    pub copyright_info: String,
    /// Omitted on replace keeps the stored count
    #[serde(default)]
    pub search_count: Option<u64>,
    #[serde(default)]
    pub rating: f64,
}

impl NewSong {
    /// Check required fields and value ranges
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("title", &self.title),
            ("artist", &self.artist),
            ("key", &self.key),
            ("genre", &self.genre),
        ] {
            if value.trim().is_empty() {
                return Err(Error::invalid(format!("{} is required", field)));
            }
        }

        if self.chords.iter().all(|c| c.trim().is_empty()) {
            return Err(Error::invalid("at least one chord is required"));
        }
        if self.difficulty.is_none() {
            return Err(Error::invalid("difficulty is required"));
        }
        if self.tempo == 0 {
            return Err(Error::invalid("tempo must be positive"));
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(Error::invalid(format!(
                "rating must be between 0 and {}, got {}",
                MAX_RATING, self.rating
            )));
        }
        Ok(())
    }

    /// Validate and turn the payload into a stored song
    ///
    /// `existing` carries over identity, creation time and (unless the payload
    /// sets it) the search count when replacing a song.
    pub fn into_song(self, id: String, existing: Option<&Song>) -> Result<Song> {
        self.validate()?;
        let difficulty = self
            .difficulty
            .ok_or_else(|| Error::invalid("difficulty is required"))?;

        let lyrics_with_chords = match (self.lyrics_with_chords.is_empty(), &self.lyrics_text) {
            (true, Some(text)) => parse_lyrics_text(text),
            _ => self.lyrics_with_chords,
        };

        Ok(Song {
            id,
            title: self.title.trim().to_string(),
            artist: self.artist.trim().to_string(),
            chords: self
                .chords
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
            key: self.key,
            difficulty,
            genre: self.genre,
            tempo: self.tempo,
            lyrics_with_chords,
            song_structure: self.song_structure,
            capo_position: self.capo_position,
            tuning: self.tuning.unwrap_or_else(default_tuning),
            strumming_pattern: self.strumming_pattern,
            lyrics_source: self.lyrics_source.unwrap_or_else(default_lyrics_source),
            copyright_info: self.copyright_info,
            search_count: self
                .search_count
                .or(existing.map(|s| s.search_count))
                .unwrap_or(0),
            rating: self.rating,
            created_at: existing.map(|s| s.created_at).unwrap_or_else(Utc::now),
        })
    }
}

/// Partial update of a song's lyrics and arrangement
///
/// Only the fields present are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LyricsUpdate {
    #[serde(default)]
    pub lyrics_with_chords: Option<Vec<LyricsSection>>,
    /// Raw text with `[Section]` headers, used when no structured lyrics given
    #[serde(default)]
    pub lyrics_text: Option<String>,
    #[serde(default)]
    pub song_structure: Option<Vec<StructureEntry>>,
    #[serde(default)]
    pub copyright_info: Option<String>,
    #[serde(default)]
    pub lyrics_source: Option<String>,
}

impl LyricsUpdate {
    /// Apply the update to a song in place
    pub fn apply_to(self, song: &mut Song) {
        if let Some(sections) = self.lyrics_with_chords {
            song.lyrics_with_chords = sections;
        } else if let Some(text) = self.lyrics_text {
            song.lyrics_with_chords = parse_lyrics_text(&text);
        }
        if let Some(structure) = self.song_structure {
            song.song_structure = structure;
        }
        if let Some(copyright) = self.copyright_info {
            song.copyright_info = copyright;
        }
        if let Some(source) = self.lyrics_source {
            song.lyrics_source = source;
        }
    }
}
