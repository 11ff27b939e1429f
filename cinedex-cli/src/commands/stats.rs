use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cinedex_scrape::ScrapeSettings;

use crate::CliError;

use super::resolve_db_path;

pub(crate) fn run_stats(db_path: Option<PathBuf>) -> Result<(), CliError> {
    let db_path = resolve_db_path(db_path, &ScrapeSettings::load());

    if !db_path.exists() {
        log::warn!("No library database found at {}", db_path.display());
        log::info!("Run 'cinedex scrape movie <FILES>' or 'cinedex scrape tv <FILES>' to create one.");
        return Ok(());
    }

    let conn = cinedex_db::open_database(&db_path)
        .map_err(|e| CliError::database(format!("Failed to open library database: {}", e)))?;

    let stats = cinedex_db::library_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query library stats: {}", e)))?;

    log::info!(
        "{}",
        "Library Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Movies:         {:>8}", stats.movies);
    log::info!("  Shows:          {:>8}", stats.tvs);
    log::info!("  Seasons:        {:>8}", stats.seasons);
    log::info!("  Episodes:       {:>8}", stats.episodes);
    log::info!("  Persons:        {:>8}", stats.persons);
    log::info!("  Credit links:   {:>8}", stats.credits);

    Ok(())
}
