use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CatalogError;

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/";
pub const DEFAULT_LANGUAGE: &str = "zh";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const ENV_API_KEY: &str = "TMDB_API_KEY";
const ENV_PROXY: &str = "TMDB_PROXY";
const ENV_LANGUAGE: &str = "TMDB_LANGUAGE";

/// Connection settings for the metadata provider.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub api_base: String,
    pub image_base: String,
    /// Response locale sent with every request.
    pub language: String,
    /// Optional HTTP(S) proxy URL every request is routed through.
    pub proxy: Option<String>,
    pub timeout: Duration,
    pub images: ImageConfig,
}

/// Local image mirroring.
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// Whether scrapes fetch poster/backdrop/still/profile images.
    pub download: bool,
    /// Root directory images are written under.
    pub dir: PathBuf,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            download: false,
            dir: default_data_dir().join("images"),
        }
    }
}

/// Where a config field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Built-in default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each provider setting.
#[derive(Debug)]
pub struct ConfigSources {
    pub api_key: ValueSource,
    pub language: ValueSource,
    pub proxy: ValueSource,
    pub image_download: ValueSource,
}

/// TOML config file format. Other sections are read by their own crates.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    tmdb: Option<TmdbSection>,
    images: Option<ImageSection>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct TmdbSection {
    api_key: Option<String>,
    api_base: Option<String>,
    image_base: Option<String>,
    language: Option<String>,
    proxy: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ImageSection {
    download: Option<bool>,
    dir: Option<PathBuf>,
}

impl TmdbConfig {
    /// Config with built-in defaults and the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            proxy: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            images: ImageConfig::default(),
        }
    }

    /// Load from environment variables and the default config file.
    ///
    /// Priority: env vars > config file > defaults. The API key is required.
    pub fn load() -> Result<Self, CatalogError> {
        let file = config_path().and_then(|p| read_config_file(&p));
        Self::resolve(file, |var| std::env::var(var).ok())
    }

    /// Load from environment variables and an explicit config file.
    pub fn load_from(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&contents)
            .map_err(|e| CatalogError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        Self::resolve(Some(file), |var| std::env::var(var).ok())
    }

    fn resolve(
        file: Option<ConfigFile>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CatalogError> {
        let file = file.unwrap_or_default();
        let tmdb = file.tmdb.unwrap_or_default();
        let images = file.images.unwrap_or_default();

        let api_key = env(ENV_API_KEY)
            .or(tmdb.api_key)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                CatalogError::Config(format!(
                    "Missing api_key. Set {} env var or add it to the [tmdb] section of the config file",
                    ENV_API_KEY
                ))
            })?;

        let mut config = Self::new(api_key);
        if let Some(base) = tmdb.api_base {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(base) = tmdb.image_base {
            config.image_base = base;
        }
        if let Some(language) = env(ENV_LANGUAGE).or(tmdb.language) {
            config.language = language;
        }
        config.proxy = env(ENV_PROXY).or(tmdb.proxy).filter(|p| !p.is_empty());
        if let Some(secs) = tmdb.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(download) = images.download {
            config.images.download = download;
        }
        if let Some(dir) = images.dir {
            config.images.dir = dir;
        }

        Ok(config)
    }
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cinedex").join("config.toml"))
}

/// Directory for the database and mirrored images.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cinedex")
}

/// Determine where each provider setting is coming from.
pub fn config_sources() -> ConfigSources {
    let file = config_path().and_then(|p| read_config_file(&p));
    let tmdb = file.as_ref().and_then(|f| f.tmdb.as_ref());
    let images = file.as_ref().and_then(|f| f.images.as_ref());

    let from = |var: &'static str, in_file: bool, default: ValueSource| {
        if std::env::var(var).is_ok() {
            ValueSource::EnvVar(var)
        } else if in_file {
            ValueSource::ConfigFile
        } else {
            default
        }
    };

    ConfigSources {
        api_key: from(
            ENV_API_KEY,
            tmdb.and_then(|t| t.api_key.as_ref()).is_some(),
            ValueSource::Missing,
        ),
        language: from(
            ENV_LANGUAGE,
            tmdb.and_then(|t| t.language.as_ref()).is_some(),
            ValueSource::Default,
        ),
        proxy: from(
            ENV_PROXY,
            tmdb.and_then(|t| t.proxy.as_ref()).is_some(),
            ValueSource::Missing,
        ),
        image_download: if images.and_then(|i| i.download).is_some() {
            ValueSource::ConfigFile
        } else {
            ValueSource::Default
        },
    }
}

fn read_config_file(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Ignoring unreadable config file {}: {}", path.display(), e);
            None
        }
    }
}
