//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cinedex")]
#[command(about = "Scrape movie and TV metadata into a local library", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by the scrape subcommands.
#[derive(Args, Clone)]
pub(crate) struct ScrapeArgs {
    /// Media files to scrape
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Gallery id stored with every scraped title
    #[arg(short, long, default_value = "")]
    pub gallery: String,

    /// Library database (default: from config, then <data_dir>/cinedex/cinedex.db)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Mirror poster, backdrop, still and profile images locally
    #[arg(long)]
    pub download_images: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Look up media files in TMDB and store them in the library
    Scrape {
        #[command(subcommand)]
        action: ScrapeAction,
    },

    /// Show what would be searched for each path, without network or database access
    Inspect {
        /// Paths to inspect
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show library database statistics
    Stats {
        /// Library database (default: from config)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ScrapeAction {
    /// Scrape movie files
    Movie(ScrapeArgs),

    /// Scrape TV episode files (paths must contain a `tv/` directory)
    Tv(ScrapeArgs),
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and their sources
    Show,

    /// Print the config file path
    Path,
}
