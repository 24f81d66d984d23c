//! Chord names
//!
//! Chords are compared case-insensitively everywhere in Chordbook. Rather than
//! lower-casing at every comparison, callers build a [`ChordSet`] once at the
//! boundary and query it with the original spellings.
//!
//! Also provides comma-separated chord list parsing (query strings, form
//! input) and semitone transposition over the sharp chromatic scale.

use std::collections::HashSet;

/// Sharp-spelled chromatic scale used for transposition
const CHROMATIC: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Canonical (case-folded) form of a chord name
pub fn canonical(chord: &str) -> String {
    chord.to_lowercase()
}

/// Case-insensitive set of chord names
///
/// Stores the canonical form of every chord; duplicates differing only by case
/// collapse into one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChordSet {
    chords: HashSet<String>,
}

impl ChordSet {
    /// Build a set from any list of chord names
    pub fn from_chords<I, S>(chords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            chords: chords.into_iter().map(|c| canonical(c.as_ref())).collect(),
        }
    }

    /// Number of distinct chords (after case folding)
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Case-insensitive membership test
    pub fn contains(&self, chord: &str) -> bool {
        self.chords.contains(&canonical(chord))
    }

    /// Size of the intersection with another set
    pub fn intersection_len(&self, other: &ChordSet) -> usize {
        self.chords.intersection(&other.chords).count()
    }

    /// Size of the union with another set
    pub fn union_len(&self, other: &ChordSet) -> usize {
        self.len() + other.len() - self.intersection_len(other)
    }

    /// Jaccard index `|A ∩ B| / |A ∪ B|`
    ///
    /// Two empty sets have no defined index; this returns `0.0` for them.
    pub fn jaccard(&self, other: &ChordSet) -> f64 {
        let union = self.union_len(other);
        if union == 0 {
            return 0.0;
        }
        self.intersection_len(other) as f64 / union as f64
    }
}

impl<S: AsRef<str>> FromIterator<S> for ChordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ChordSet::from_chords(iter)
    }
}

/// Parse a comma-separated chord list (`"G, C,D"` → `["G", "C", "D"]`)
///
/// Entries are trimmed; empty entries are dropped. Order and casing are kept.
pub fn parse_chord_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|chord| !chord.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a chord into its root (`[A-G][#b]?`) and the remaining suffix
///
/// Returns `None` when the chord does not start with a note letter.
fn split_root(chord: &str) -> Option<(&str, &str)> {
    let mut chars = chord.char_indices();
    let (_, letter) = chars.next()?;
    if !('A'..='G').contains(&letter) {
        return None;
    }

    let root_end = match chars.next() {
        Some((idx, '#')) | Some((idx, 'b')) => idx + 1,
        Some((idx, _)) => idx,
        None => chord.len(),
    };

    Some(chord.split_at(root_end))
}

/// Map a flat root onto its sharp spelling
fn flat_to_sharp(root: &str) -> &str {
    match root {
        "Db" => "C#",
        "Eb" => "D#",
        "Gb" => "F#",
        "Ab" => "G#",
        "Bb" => "A#",
        other => other,
    }
}

/// Transpose a chord by `steps` semitones (negative steps transpose down)
///
/// The root is moved along the sharp chromatic scale and the suffix (`m7`,
/// `sus4`, `/F#` ...) is kept verbatim. Flat roots are respelled as sharps.
/// Chords whose root cannot be read (`N.C.`, `Cb`, `E#`) come back unchanged.
///
/// # Examples
/// ```
/// use chordbook_common::chords::transpose_chord;
///
/// assert_eq!(transpose_chord("Am7", 2), "Bm7");
/// assert_eq!(transpose_chord("Bb", 1), "B");
/// assert_eq!(transpose_chord("C", -1), "B");
/// ```
pub fn transpose_chord(chord: &str, steps: i32) -> String {
    let Some((root, suffix)) = split_root(chord) else {
        return chord.to_string();
    };

    let root = flat_to_sharp(root);
    let Some(index) = CHROMATIC.iter().position(|note| *note == root) else {
        return chord.to_string();
    };

    let new_index = (index as i32 + steps.rem_euclid(12)).rem_euclid(12) as usize;
    format!("{}{}", CHROMATIC[new_index], suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_set_is_case_insensitive() {
        let set = ChordSet::from_chords(["G", "em", "Em", "C"]);
        assert_eq!(set.len(), 3);
        assert!(set.contains("EM"));
        assert!(set.contains("g"));
        assert!(!set.contains("D"));
    }

    #[test]
    fn test_jaccard_partial_overlap() {
        let query = ChordSet::from_chords(["G", "C", "D"]);
        let song = ChordSet::from_chords(["G", "C", "D", "Em"]);
        assert_eq!(query.intersection_len(&song), 3);
        assert_eq!(query.union_len(&song), 4);
        assert!((query.jaccard(&song) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_jaccard_disjoint() {
        let query = ChordSet::from_chords(["G", "C", "D"]);
        let song = ChordSet::from_chords(["F", "Bm"]);
        assert_eq!(query.jaccard(&song), 0.0);
        assert_eq!(query.union_len(&song), 5);
    }

    #[test]
    fn test_jaccard_both_empty_falls_back_to_zero() {
        let empty = ChordSet::default();
        assert_eq!(empty.jaccard(&ChordSet::default()), 0.0);
    }

    #[test]
    fn test_parse_chord_list() {
        assert_eq!(parse_chord_list("G, C ,D"), vec!["G", "C", "D"]);
        assert_eq!(parse_chord_list("Am,,  ,F"), vec!["Am", "F"]);
        assert!(parse_chord_list("  ").is_empty());
    }

    #[test]
    fn test_transpose_basic() {
        assert_eq!(transpose_chord("C", 2), "D");
        assert_eq!(transpose_chord("G", 5), "C");
        assert_eq!(transpose_chord("A", 3), "C");
        assert_eq!(transpose_chord("Em", 0), "Em");
    }

    #[test]
    fn test_transpose_keeps_suffix() {
        assert_eq!(transpose_chord("Am7", 2), "Bm7");
        assert_eq!(transpose_chord("Dsus4", -2), "Csus4");
        assert_eq!(transpose_chord("D/F#", 2), "E/F#");
    }

    #[test]
    fn test_transpose_flats_become_sharps() {
        assert_eq!(transpose_chord("Bb", 0), "A#");
        assert_eq!(transpose_chord("Ebm", 1), "Em");
        assert_eq!(transpose_chord("Ab7", -1), "G7");
    }

    #[test]
    fn test_transpose_wraps_in_both_directions() {
        assert_eq!(transpose_chord("B", 1), "C");
        assert_eq!(transpose_chord("C", -1), "B");
        assert_eq!(transpose_chord("C", 25), "C#");
        assert_eq!(transpose_chord("C", -13), "B");
    }

    #[test]
    fn test_transpose_extreme_steps() {
        // i32::MAX % 12 == 7, i32::MIN.rem_euclid(12) == 4
        assert_eq!(transpose_chord("C#", i32::MAX), "G#");
        assert_eq!(transpose_chord("C", i32::MIN), "E");
        assert_eq!(transpose_chord("Bm7", i32::MAX), "F#m7");
    }

    #[test]
    fn test_transpose_unreadable_roots_unchanged() {
        assert_eq!(transpose_chord("N.C.", 3), "N.C.");
        assert_eq!(transpose_chord("am", 3), "am");
        assert_eq!(transpose_chord("Cb", 1), "Cb");
        assert_eq!(transpose_chord("E#", 1), "E#");
        assert_eq!(transpose_chord("", 1), "");
    }
}
