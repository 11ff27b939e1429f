pub(crate) mod config;
pub(crate) mod inspect;
pub(crate) mod scrape;
pub(crate) mod stats;

use std::path::PathBuf;

use cinedex_scrape::ScrapeSettings;

/// Database path: explicit flag, then config/env, then the default location.
pub(crate) fn resolve_db_path(flag: Option<PathBuf>, settings: &ScrapeSettings) -> PathBuf {
    flag.unwrap_or_else(|| settings.database.clone())
}
