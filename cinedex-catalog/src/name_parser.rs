//! Parser for noisy media file paths.
//!
//! Library paths mix Chinese and Latin text, URL escapes and a handful of
//! naming conventions:
//! ```text
//! /movies/让子弹飞.2010.1080p.mkv
//! /tv/%E9%9D%92%E6%98%A5/第二季/Show.S02E05.mkv
//! /tv/Show/SP/03.mkv
//! ```
//!
//! Movies yield a search title; episodes yield a season/episode pair.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ExtractError;
use crate::numeral::NumeralResolver;
use crate::types::TitleKind;

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{4}").unwrap());
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());
static PARENTHESIZED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\([^)]+\)").unwrap());
static HAN_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\p{Han}|[0-9]{1,2})+").unwrap());

static SEASON_EPISODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[Ss]([0-9]{1,2})[Ee]([0-9]{1,4})").unwrap());
static EPISODE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]{1,4}").unwrap());
static LOCALIZED_SEASON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"第\p{Han}+季").unwrap());
static SEASON_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[Ss]([0-9]{1,2})").unwrap());

/// Directory segment holding specials; files below it are season 0.
const SPECIALS_SEGMENT: &str = "/SP/";

/// What a path tells us about the media it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSignature {
    /// Candidate search title for a movie.
    Title(String),
    /// Season and episode numbers for a television file.
    SeasonEpisode { season: u32, episode: u32 },
}

impl std::fmt::Display for PathSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSignature::Title(title) => write!(f, "\"{}\"", title),
            PathSignature::SeasonEpisode { season, episode } => {
                write!(f, "S{:02}E{:02}", season, episode)
            }
        }
    }
}

/// Derive a search title from a movie file name (extension already removed).
///
/// Never fails; an empty name yields an empty title.
///
/// # Examples
///
/// ```
/// use cinedex_catalog::name_parser::extract_movie_title;
///
/// assert_eq!(extract_movie_title("标题.2010.1080p"), "标题");
/// assert_eq!(extract_movie_title("让子弹飞 (Let the Bullets Fly)"), "让子弹飞");
/// assert_eq!(extract_movie_title("Inception.2010"), "Inception.");
/// ```
pub fn extract_movie_title(raw: &str) -> String {
    let mut name = YEAR.replace_all(raw, "").into_owned();

    // Purely numeric titles lose everything to the year filter
    if name.is_empty() {
        if let Some(m) = DIGITS.find(raw) {
            name = m.as_str().to_string();
        }
    }

    let name = PARENTHESIZED.replace_all(&name, "").into_owned();

    match HAN_TITLE.find(&name) {
        Some(m) => {
            let title = m.as_str();
            title.strip_suffix('1').unwrap_or(title).to_string()
        }
        None => name,
    }
}

/// Decode a URL query-escaped path (`%XX` escapes, `+` as space).
///
/// Malformed escapes and non-UTF-8 results are rejected.
pub fn query_unescape(raw: &str) -> Result<String, ExtractError> {
    let bytes = raw.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'%' {
            let escape_ok = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !escape_ok {
                let end = (i + 3).min(raw.len());
                return Err(ExtractError::Decode(format!(
                    "invalid escape '{}'",
                    String::from_utf8_lossy(&bytes[i..end])
                )));
            }
        }
    }

    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .map_err(|e| ExtractError::Decode(e.to_string()))
}

fn parse_number(digits: &str) -> Result<u32, ExtractError> {
    digits
        .parse::<u32>()
        .map_err(|_| ExtractError::InvalidNumber(digits.to_string()))
}

/// Path heuristics that depend on the configured season phrase table.
#[derive(Debug, Clone, Default)]
pub struct PathParser {
    pub(crate) numerals: NumeralResolver,
}

impl PathParser {
    pub fn new(numerals: NumeralResolver) -> Self {
        Self { numerals }
    }

    /// Search title for a movie file: its base name, extension stripped,
    /// run through [`extract_movie_title`].
    pub fn movie_title(&self, file_path: &str) -> Result<String, ExtractError> {
        Ok(extract_movie_title(&file_stem(file_path)?))
    }

    /// Extract the signature appropriate for `kind` from a file path.
    pub fn signature(&self, file_path: &str, kind: TitleKind) -> Result<PathSignature, ExtractError> {
        match kind {
            TitleKind::Movie => Ok(PathSignature::Title(self.movie_title(file_path)?)),
            TitleKind::Tv => {
                let (season, episode) = self.season_episode(file_path)?;
                Ok(PathSignature::SeasonEpisode { season, episode })
            }
        }
    }

    /// Season and episode numbers for a television file.
    ///
    /// An `SxxEyy` marker in the file name wins; otherwise the season comes
    /// from [`season`](Self::season) over the whole path and the episode is
    /// the first 1-4 digit run in the file name.
    pub fn season_episode(&self, file_path: &str) -> Result<(u32, u32), ExtractError> {
        let file_name = absolute_file_name(file_path)?;

        if let Some(caps) = SEASON_EPISODE.captures(&file_name) {
            let season = parse_number(&caps[1])?;
            let episode = parse_number(&caps[2])?;
            return Ok((season, episode));
        }

        let season = self.season(file_path)?;
        let episode = EPISODE_NUMBER
            .find(&file_name)
            .ok_or_else(|| ExtractError::pattern_mismatch(format!("episode number in '{file_name}'")))?;
        Ok((season, parse_number(episode.as_str())?))
    }

    /// Season number implied by anywhere in the path.
    ///
    /// Order: localized phrase ("第三季"), then `S` + 1-2 digits, then the
    /// specials directory (season 0), then season 1.
    pub fn season(&self, file_path: &str) -> Result<u32, ExtractError> {
        let decoded = query_unescape(file_path)?;

        if let Some(m) = LOCALIZED_SEASON.find(&decoded) {
            return self
                .numerals
                .resolve(m.as_str())
                .ok_or_else(|| ExtractError::NumeralUnresolved(m.as_str().to_string()));
        }

        if let Some(caps) = SEASON_MARKER.captures(&decoded) {
            return parse_number(&caps[1]);
        }

        if decoded.contains(SPECIALS_SEGMENT) {
            Ok(0)
        } else {
            Ok(1)
        }
    }
}

/// Final segment of the absolute form of `file_path`.
fn absolute_file_name(file_path: &str) -> Result<String, ExtractError> {
    let absolute = std::path::absolute(Path::new(file_path))?;
    absolute
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ExtractError::pattern_mismatch(format!("file name in '{file_path}'")))
}

/// Base name of `file_path` without its extension.
fn file_stem(file_path: &str) -> Result<String, ExtractError> {
    let absolute = std::path::absolute(Path::new(file_path))?;
    absolute
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ExtractError::pattern_mismatch(format!("file name in '{file_path}'")))
}
