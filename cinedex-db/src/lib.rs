//! SQLite persistence layer for the media library.
//!
//! Provides schema creation, the create-or-update ("chunk") operations for
//! every entity kind, and read-back queries, backed by SQLite (via rusqlite
//! with the bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    Chunked, OperationError, chunk_episode, chunk_movie, chunk_person, chunk_season, chunk_tv,
    person_exists,
};
pub use queries::{
    LibraryStats, episodes_for_season, find_episode, find_movie, find_person, find_season,
    find_tv, library_stats, person_credits, seasons_for_tv,
};
pub use rusqlite::Connection;
pub use schema::{SchemaError, open_database, open_memory};
