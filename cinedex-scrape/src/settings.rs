use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cinedex_catalog::{NumeralResolver, PathParser, TitleKind};
use cinedex_tmdb::ValueSource;
use serde::Deserialize;

use crate::error::ScrapeError;

/// Cast and crew entries kept per title before any person is fetched.
pub const DEFAULT_CREDIT_LIMIT: usize = 24;

const ENV_DATABASE: &str = "CINEDEX_DB";

/// Which credited persons a scrape fetches and re-links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersonRefresh {
    /// Only persons not yet stored; known persons are left as they are.
    NewOnly,
    /// Every credited person, stored or not.
    Always,
}

impl PersonRefresh {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonRefresh::NewOnly => "new-only",
            PersonRefresh::Always => "always",
        }
    }
}

impl std::fmt::Display for PersonRefresh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-scrape behavior.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub credit_limit: usize,
    pub movie_person_refresh: PersonRefresh,
    pub tv_person_refresh: PersonRefresh,
    /// Mirror poster/backdrop/still/profile images locally.
    pub download_images: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            credit_limit: DEFAULT_CREDIT_LIMIT,
            movie_person_refresh: PersonRefresh::NewOnly,
            tv_person_refresh: PersonRefresh::Always,
            download_images: false,
        }
    }
}

impl ScrapeOptions {
    pub fn person_refresh(&self, kind: TitleKind) -> PersonRefresh {
        match kind {
            TitleKind::Movie => self.movie_person_refresh,
            TitleKind::Tv => self.tv_person_refresh,
        }
    }
}

/// Scrape settings read from the `[scrape]` and `[seasons]` sections of the
/// shared config file.
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    pub database: PathBuf,
    pub options: ScrapeOptions,
    pub numerals: NumeralResolver,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            database: default_database(),
            options: ScrapeOptions::default(),
            numerals: NumeralResolver::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    scrape: Option<ScrapeSection>,
    seasons: Option<BTreeMap<String, u32>>,
}

#[derive(Debug, Default, Deserialize)]
struct ScrapeSection {
    credit_limit: Option<usize>,
    movie_person_refresh: Option<PersonRefresh>,
    tv_person_refresh: Option<PersonRefresh>,
    database: Option<PathBuf>,
}

impl ScrapeSettings {
    /// Load from the environment and the default config file.
    ///
    /// A missing or unreadable config file yields the defaults.
    pub fn load() -> Self {
        let file = cinedex_tmdb::config_path().and_then(|p| read_settings_file(&p));
        Self::resolve(file, |var| std::env::var(var).ok())
    }

    /// Load from the environment and an explicit config file.
    pub fn load_from(path: &Path) -> Result<Self, ScrapeError> {
        let contents = std::fs::read_to_string(path)?;
        let file: SettingsFile = toml::from_str(&contents)
            .map_err(|e| ScrapeError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        Ok(Self::resolve(Some(file), |var| std::env::var(var).ok()))
    }

    fn resolve(file: Option<SettingsFile>, env: impl Fn(&str) -> Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let scrape = file.scrape.unwrap_or_default();
        let mut settings = Self::default();

        if let Some(path) = env(ENV_DATABASE)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or(scrape.database)
        {
            settings.database = path;
        }
        if let Some(limit) = scrape.credit_limit {
            settings.options.credit_limit = limit;
        }
        if let Some(refresh) = scrape.movie_person_refresh {
            settings.options.movie_person_refresh = refresh;
        }
        if let Some(refresh) = scrape.tv_person_refresh {
            settings.options.tv_person_refresh = refresh;
        }
        if let Some(seasons) = file.seasons.filter(|s| !s.is_empty()) {
            settings.numerals = NumeralResolver::new(seasons);
        }

        settings
    }

    /// Path parser using the configured season phrases.
    pub fn parser(&self) -> PathParser {
        PathParser::new(self.numerals.clone())
    }
}

/// Default library database location.
pub fn default_database() -> PathBuf {
    cinedex_tmdb::default_data_dir().join("cinedex.db")
}

/// Where the database path setting is coming from.
pub fn database_source() -> ValueSource {
    if std::env::var(ENV_DATABASE).is_ok() {
        return ValueSource::EnvVar(ENV_DATABASE);
    }
    let in_file = cinedex_tmdb::config_path()
        .and_then(|p| read_settings_file(&p))
        .and_then(|f| f.scrape)
        .and_then(|s| s.database)
        .is_some();
    if in_file {
        ValueSource::ConfigFile
    } else {
        ValueSource::Default
    }
}

fn read_settings_file(path: &Path) -> Option<SettingsFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(file) => Some(file),
        Err(e) => {
            log::warn!("Ignoring unreadable config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn parse(contents: &str) -> SettingsFile {
        toml::from_str(contents).unwrap()
    }

    #[test]
    fn defaults_without_file() {
        let settings = ScrapeSettings::resolve(None, no_env);
        assert_eq!(settings.options.credit_limit, 24);
        assert_eq!(settings.options.movie_person_refresh, PersonRefresh::NewOnly);
        assert_eq!(settings.options.tv_person_refresh, PersonRefresh::Always);
        assert!(settings.database.ends_with("cinedex.db"));
        assert_eq!(settings.numerals.resolve("第三季"), Some(3));
    }

    #[test]
    fn scrape_section_overrides_defaults() {
        let file = parse(
            r#"
[tmdb]
api_key = "ignored here"

[scrape]
credit_limit = 5
movie_person_refresh = "always"
tv_person_refresh = "new-only"
database = "/srv/library.db"
"#,
        );
        let settings = ScrapeSettings::resolve(Some(file), no_env);
        assert_eq!(settings.options.credit_limit, 5);
        assert_eq!(settings.options.person_refresh(TitleKind::Movie), PersonRefresh::Always);
        assert_eq!(settings.options.person_refresh(TitleKind::Tv), PersonRefresh::NewOnly);
        assert_eq!(settings.database, PathBuf::from("/srv/library.db"));
    }

    #[test]
    fn env_database_wins() {
        let file = parse("[scrape]\ndatabase = \"/from/file.db\"\n");
        let env = |var: &str| (var == "CINEDEX_DB").then(|| "/from/env.db".to_string());
        let settings = ScrapeSettings::resolve(Some(file), env);
        assert_eq!(settings.database, PathBuf::from("/from/env.db"));
    }

    #[test]
    fn seasons_table_replaces_phrases() {
        let file = parse("[seasons]\n\"第十一季\" = 11\n\"特别篇\" = 0\n");
        let settings = ScrapeSettings::resolve(Some(file), no_env);
        assert_eq!(settings.numerals.resolve("第十一季"), Some(11));
        assert_eq!(settings.numerals.resolve("第一季"), None);
        assert_eq!(settings.parser().season("/tv/Show/第十一季/01.mkv").unwrap(), 11);
    }

    #[test]
    fn unknown_refresh_policy_is_rejected() {
        let parsed: Result<SettingsFile, _> = toml::from_str("[scrape]\nmovie_person_refresh = \"sometimes\"\n");
        assert!(parsed.is_err());
    }
}
