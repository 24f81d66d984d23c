//! HTTP API handlers for chordbook-api

pub mod error;
pub mod health;
pub mod lyrics;
pub mod params;
pub mod recommendations;
pub mod songs;

pub use error::ApiError;
pub use health::health_routes;
pub use lyrics::{get_full_song, update_lyrics};
pub use recommendations::{recommend_by_chords, similar_songs, trending_songs};
pub use songs::{create_song, delete_song, get_song, list_songs, search_songs, update_song};
