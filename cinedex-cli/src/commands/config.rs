use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cinedex_scrape::ScrapeSettings;
use cinedex_tmdb::{TmdbConfig, ValueSource};

fn mask_value(s: &str) -> String {
    if s.chars().count() <= 2 {
        "****".to_string()
    } else {
        format!("{}****", s.chars().take(2).collect::<String>())
    }
}

fn log_field(name: &str, value: Option<String>, source: &ValueSource) {
    let source_str = format!("({})", source);
    let label = format!("{}:", name);
    match value {
        Some(v) => {
            log::info!(
                "  {} {} {}",
                label.if_supports_color(Stdout, |t| t.cyan()),
                v,
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  {} {} {}",
                label.if_supports_color(Stdout, |t| t.cyan()),
                "not set".if_supports_color(Stdout, |t| t.yellow()),
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
}

/// Show current settings and their sources.
pub(crate) fn run_config_show() {
    let path = cinedex_tmdb::config_path();
    let sources = cinedex_tmdb::config_sources();

    log::info!(
        "{}",
        "cinedex Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    // Per-field, since load() fails outright without an api key
    let config = match TmdbConfig::load() {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    };
    let settings = ScrapeSettings::load();

    log_field(
        "api_key",
        config.as_ref().map(|c| mask_value(&c.api_key)),
        &sources.api_key,
    );
    log_field(
        "language",
        config.as_ref().map(|c| c.language.clone()),
        &sources.language,
    );
    log_field(
        "proxy",
        config.as_ref().and_then(|c| c.proxy.clone()),
        &sources.proxy,
    );
    log_field(
        "images.download",
        config.as_ref().map(|c| c.images.download.to_string()),
        &sources.image_download,
    );
    log_field(
        "database",
        Some(settings.database.display().to_string()),
        &cinedex_scrape::database_source(),
    );

    crate::log_blank();
    log::info!("  credit_limit: {}", settings.options.credit_limit);
    log::info!(
        "  person refresh: movie {}, tv {}",
        settings.options.movie_person_refresh,
        settings.options.tv_person_refresh,
    );
    let phrases: Vec<String> = settings
        .numerals
        .phrases()
        .into_iter()
        .map(|(phrase, n)| format!("{}={}", phrase, n))
        .collect();
    log::info!("  season phrases: {}", phrases.join(" "));
}

/// Print the config file path.
pub(crate) fn run_config_path() {
    match cinedex_tmdb::config_path() {
        Some(p) => println!("{}", p.display()),
        None => log::error!("Could not determine config directory"),
    }
}
