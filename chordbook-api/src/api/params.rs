//! Query parameter helpers shared by handlers

use chordbook_common::chords::parse_chord_list;
use chordbook_common::{Difficulty, UserPreferences};

use super::ApiError;

/// Requested `limit`, or `default` when absent
///
/// An explicit limit must be positive.
pub fn resolve_limit(requested: Option<i64>, default: usize) -> Result<usize, ApiError> {
    match requested {
        None => Ok(default),
        Some(n) if n > 0 => Ok(n as usize),
        Some(n) => Err(ApiError::BadRequest(format!(
            "limit must be a positive integer, got {}",
            n
        ))),
    }
}

/// Required comma-separated chord list
pub fn required_chords(chords: Option<&str>) -> Result<Vec<String>, ApiError> {
    let parsed = chords.map(parse_chord_list).unwrap_or_default();
    if parsed.is_empty() {
        return Err(ApiError::BadRequest("Chords parameter is required".to_string()));
    }
    Ok(parsed)
}

/// Optional difficulty parameter
pub fn parse_difficulty(value: Option<&str>) -> Result<Option<Difficulty>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => Difficulty::from_str(v)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown difficulty: {}", v))),
    }
}

/// Preferences from `genres=Folk,Rock` and `skill_level=Beginner`
///
/// Returns `None` when neither parameter is given.
pub fn parse_preferences(
    genres: Option<&str>,
    skill_level: Option<&str>,
) -> Result<Option<UserPreferences>, ApiError> {
    let favorite_genres: Vec<String> = genres
        .map(|g| {
            g.split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let skill_level = parse_difficulty(skill_level)?;

    if favorite_genres.is_empty() && skill_level.is_none() {
        return Ok(None);
    }
    Ok(Some(UserPreferences {
        favorite_genres,
        skill_level,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_limit() {
        assert_eq!(resolve_limit(None, 5).unwrap(), 5);
        assert_eq!(resolve_limit(Some(3), 5).unwrap(), 3);
        assert!(matches!(resolve_limit(Some(0), 5), Err(ApiError::BadRequest(_))));
        assert!(resolve_limit(Some(-2), 5).is_err());
    }

    #[test]
    fn test_required_chords() {
        assert_eq!(required_chords(Some("G, C")).unwrap(), vec!["G", "C"]);
        assert!(required_chords(None).is_err());
        assert!(required_chords(Some(" , ")).is_err());
    }

    #[test]
    fn test_parse_preferences() {
        assert_eq!(parse_preferences(None, None).unwrap(), None);
        assert_eq!(parse_preferences(Some(""), Some(" ")).unwrap(), None);

        let prefs = parse_preferences(Some("Folk, Rock"), Some("beginner"))
            .unwrap()
            .unwrap();
        assert_eq!(prefs.favorite_genres, vec!["Folk", "Rock"]);
        assert_eq!(prefs.skill_level, Some(Difficulty::Beginner));

        assert!(parse_preferences(None, Some("guru")).is_err());
    }
}
