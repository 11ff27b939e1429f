//! Turns media file paths into stored library records.
//!
//! A scrape derives a signature from the path, resolves it against the
//! metadata catalog, reconciles the credited people, and chunks the title
//! chain into the library database.

pub mod error;
mod images;
pub mod progress;
pub mod reconcile;
pub mod scrape;
pub mod settings;

pub use error::ScrapeError;
pub use progress::{LogProgress, ScrapeProgress, SilentProgress};
pub use reconcile::{PersonStats, reconcile_persons};
pub use scrape::{FileOutcome, ScrapeReport, Scraper};
pub use settings::{
    DEFAULT_CREDIT_LIMIT, PersonRefresh, ScrapeOptions, ScrapeSettings, database_source,
    default_database,
};
