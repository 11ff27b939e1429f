use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cinedex_catalog::{PathParser, TitleKind};
use cinedex_scrape::ScrapeSettings;

/// Print what each path would be searched for as a movie and as a show.
pub(crate) fn run_inspect(paths: &[PathBuf]) {
    let parser = ScrapeSettings::load().parser();

    for (i, path) in paths.iter().enumerate() {
        if i > 0 {
            crate::log_blank();
        }
        let path = path.to_string_lossy();
        log::info!("{}", path.if_supports_color(Stdout, |t| t.cyan()));
        inspect_path(&parser, &path);
    }
}

fn inspect_path(parser: &PathParser, path: &str) {
    match parser.movie_title(path) {
        Ok(title) => log::info!("  Movie title:  {}", title),
        Err(e) => log::info!("  Movie title:  {}", e.if_supports_color(Stdout, |t| t.dimmed())),
    }
    match parser.show_name(path) {
        Ok(name) => log::info!("  Show name:    {}", name),
        Err(e) => log::info!("  Show name:    {}", e.if_supports_color(Stdout, |t| t.dimmed())),
    }
    match parser.signature(path, TitleKind::Tv) {
        Ok(signature) => log::info!("  Episode:      {}", signature),
        Err(e) => log::info!("  Episode:      {}", e.if_supports_color(Stdout, |t| t.dimmed())),
    }
}
