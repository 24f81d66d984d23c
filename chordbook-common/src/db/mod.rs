//! SQLite song storage

pub mod init;
pub mod sample;
pub mod songs;

pub use init::init_database;
pub use songs::*;
