//! # Chordbook Common Library
//!
//! Shared code for the Chordbook guitar song catalog:
//! - Song, lyrics and arrangement models
//! - Chord normalization, list parsing and transposition
//! - Recommendation scoring and ranking
//! - Lyrics parsing and chord layout
//! - Catalog filtering
//! - Configuration loading
//! - SQLite song storage (`sqlx` feature, on by default)

pub mod catalog;
pub mod chords;
pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod lyrics;
pub mod models;
pub mod ranking;
pub mod scoring;

pub use error::{Error, Result};
pub use models::{Difficulty, Song};
pub use ranking::{recommend, similar_to, trending, RecommendationQuery, ScoredResult};
pub use scoring::UserPreferences;
