//! Lyrics structure
//!
//! Turns free-form lyrics text into [`LyricsSection`]s, lays out chord
//! annotations over a line, expands the song arrangement, and transposes
//! every chord of a lyrics sheet.

use serde::Serialize;

use crate::chords::transpose_chord;
use crate::models::{LyricsLine, LyricsSection, SectionType, Song};

/// Name of the section lines belong to before the first header
const DEFAULT_SECTION_NAME: &str = "Verse 1";

fn new_section(name: &str) -> LyricsSection {
    LyricsSection {
        section_type: SectionType::from_section_name(name),
        section_name: name.to_string(),
        lines: Vec::new(),
    }
}

/// Parse lyrics text with `[Section Name]` headers into sections
///
/// - Whitespace-only input yields no sections.
/// - Lines are kept verbatim, including blank lines and indentation.
/// - Lines before the first header belong to an implicit "Verse 1".
/// - A header with no lines after it produces no section.
/// - Parsed lines carry no chord positions.
///
/// # Examples
/// ```
/// use chordbook_common::lyrics::parse_lyrics_text;
///
/// let sections = parse_lyrics_text("[Chorus]\nWe are young\n[Verse 2]\nWalking on");
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[0].section_name, "Chorus");
/// ```
pub fn parse_lyrics_text(text: &str) -> Vec<LyricsSection> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut sections = Vec::new();
    let mut current = new_section(DEFAULT_SECTION_NAME);

    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
            let finished = std::mem::replace(&mut current, new_section(&trimmed[1..trimmed.len() - 1]));
            if !finished.lines.is_empty() {
                sections.push(finished);
            }
        } else {
            current.lines.push(LyricsLine::plain(line));
        }
    }

    if !current.lines.is_empty() {
        sections.push(current);
    }

    sections
}

/// Piece of a laid-out lyrics line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum LineSegment {
    Text(String),
    Chord(String),
}

/// Lay out a line as alternating text and chord segments
///
/// Chords are ordered by position (equal positions keep their stored order).
/// Each chord is preceded by the text between the previous chord position
/// and its own; the text after the last chord closes the line. Positions past
/// the end of the line are clamped to it. `transpose` shifts every chord label
/// by that many semitones.
pub fn layout_line(line: &LyricsLine, transpose: i32) -> Vec<LineSegment> {
    let chars: Vec<char> = line.text.chars().collect();
    let text_between = |from: usize, to: usize| chars[from..to].iter().collect::<String>();

    let mut chords: Vec<_> = line.chords.iter().collect();
    chords.sort_by_key(|c| c.position);

    let mut segments = Vec::with_capacity(chords.len() * 2 + 1);
    let mut last = 0;

    for chord in chords {
        let position = chord.position.min(chars.len());
        if position > last {
            segments.push(LineSegment::Text(text_between(last, position)));
        }
        let label = if transpose != 0 {
            transpose_chord(&chord.chord, transpose)
        } else {
            chord.chord.clone()
        };
        segments.push(LineSegment::Chord(label));
        last = position;
    }

    if last < chars.len() {
        segments.push(LineSegment::Text(text_between(last, chars.len())));
    }

    segments
}

/// One played occurrence of a section within the arrangement
#[derive(Debug, Clone, Serialize)]
pub struct ArrangedSection<'a> {
    pub section: &'a LyricsSection,
    /// 1-based repetition number
    pub repeat_index: u32,
    pub repeat_total: u32,
}

/// Expand the song's arrangement into the sequence of sections as played
///
/// Without a `song_structure` the stored sections are played once each, in
/// order. Otherwise every structure entry is resolved by exact section name
/// (unknown names are skipped) and repeated `repeat` times (at least once).
pub fn arrange(song: &Song) -> Vec<ArrangedSection<'_>> {
    if song.song_structure.is_empty() {
        return song
            .lyrics_with_chords
            .iter()
            .map(|section| ArrangedSection {
                section,
                repeat_index: 1,
                repeat_total: 1,
            })
            .collect();
    }

    let mut arranged = Vec::new();
    for entry in &song.song_structure {
        let Some(section) = song
            .lyrics_with_chords
            .iter()
            .find(|s| s.section_name == entry.section)
        else {
            tracing::debug!("Arrangement references unknown section '{}'", entry.section);
            continue;
        };

        let total = entry.repeat.max(1);
        arranged.extend((1..=total).map(|repeat_index| ArrangedSection {
            section,
            repeat_index,
            repeat_total: total,
        }));
    }
    arranged
}

/// Copy of the sections with every chord transposed by `steps` semitones
pub fn transpose_sections(sections: &[LyricsSection], steps: i32) -> Vec<LyricsSection> {
    let mut transposed = sections.to_vec();
    if steps == 0 {
        return transposed;
    }
    for chord in transposed
        .iter_mut()
        .flat_map(|s| s.lines.iter_mut())
        .flat_map(|l| l.chords.iter_mut())
    {
        chord.chord = transpose_chord(&chord.chord, steps);
    }
    transposed
}
