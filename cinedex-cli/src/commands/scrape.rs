use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cinedex_catalog::TitleKind;
use cinedex_scrape::{LogProgress, ScrapeSettings, Scraper};
use cinedex_tmdb::{TmdbClient, TmdbConfig};

use crate::CliError;
use crate::cli_types::ScrapeArgs;

use super::resolve_db_path;

pub(crate) fn run_scrape(kind: TitleKind, args: ScrapeArgs) -> Result<(), CliError> {
    let config = TmdbConfig::load().map_err(|e| CliError::config(e.to_string()))?;
    let settings = ScrapeSettings::load();

    let mut options = settings.options.clone();
    options.download_images = args.download_images || config.images.download;

    let db_path = resolve_db_path(args.db, &settings);
    let conn = cinedex_db::open_database(&db_path)
        .map_err(|e| CliError::database(format!("Failed to open library database: {}", e)))?;
    log::debug!("Using library database {}", db_path.display());

    let client = TmdbClient::new(config).map_err(|e| CliError::config(e.to_string()))?;
    let scraper = Scraper::new(&client, &conn, settings.parser(), options);

    let paths: Vec<String> = args
        .files
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();

    log::info!(
        "{} {} file(s) as {}",
        "Scraping".if_supports_color(Stdout, |t| t.bold()),
        paths.len(),
        kind,
    );
    let outcomes = scraper.scrape_batch(kind, &paths, &args.gallery, &LogProgress);

    let total = outcomes.len();
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    let persons = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().ok())
        .fold(0, |n, report| n + report.persons.created + report.persons.updated);

    crate::log_blank();
    log::info!(
        "{} {} scraped, {} failed, {} person(s) stored",
        "Done:".if_supports_color(Stdout, |t| t.bold()),
        (total - failed).if_supports_color(Stdout, |t| t.green()),
        failed.if_supports_color(Stdout, |t| t.red()),
        persons,
    );

    if failed > 0 {
        return Err(CliError::ScrapeFailed { failed, total });
    }
    Ok(())
}
