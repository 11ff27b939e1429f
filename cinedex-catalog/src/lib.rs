//! Movie/TV data model and path signature extraction.
//!
//! This crate defines the entities persisted by `cinedex-db` without any
//! database or network dependencies, plus the heuristics that turn a noisy
//! media file path into a search title, a show name, or a season/episode pair.

pub mod error;
pub mod name_parser;
pub mod numeral;
pub mod show_name;
pub mod types;

pub use error::ExtractError;
pub use name_parser::{PathParser, PathSignature, extract_movie_title, query_unescape};
pub use numeral::{DEFAULT_SEASON_PHRASES, NumeralResolver};
pub use show_name::SegmentRole;
pub use types::*;
