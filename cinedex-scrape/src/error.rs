use cinedex_catalog::ExtractError;
use cinedex_db::OperationError;
use cinedex_tmdb::CatalogError;
use thiserror::Error;

/// Failure of a single file's scrape. Nothing of the title chain is stored
/// when one of these is returned.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Path error: {0}")]
    Extract(#[from] ExtractError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}
