//! cinedex CLI
//!
//! Command-line interface for scraping movie and TV files into a local library.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use cinedex_catalog::TitleKind;
use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction, ScrapeAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let result = match cli.command {
        Commands::Scrape { action } => match action {
            ScrapeAction::Movie(args) => commands::scrape::run_scrape(TitleKind::Movie, args),
            ScrapeAction::Tv(args) => commands::scrape::run_scrape(TitleKind::Tv, args),
        },
        Commands::Inspect { paths } => {
            commands::inspect::run_inspect(&paths);
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show();
                Ok(())
            }
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
        Commands::Stats { db } => commands::stats::run_stats(db),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Route `log` output to stdout through env_logger.
///
/// Normal runs print bare messages at info level; `--verbose` adds
/// timestamps, levels and debug output; `--quiet` keeps warnings and errors.
/// `RUST_LOG` still overrides the level when set.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        log::LevelFilter::Warn
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    if !verbose {
        builder.format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level, record.args()),
        });
    }
    builder.target(env_logger::Target::Stdout).init();
}

/// Log an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}
