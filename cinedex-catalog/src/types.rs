//! Data model types for the media library.
//!
//! These types double as the provider's payload shapes: detail responses
//! deserialize straight into them, and the local-only fields (`url`,
//! `gallery_uid`, back-references, timestamps) default to empty.

use serde::{Deserialize, Serialize};

/// The metadata provider's integer identifier for a title or person.
pub type CatalogId = i64;

// ── Kinds ───────────────────────────────────────────────────────────────────

/// Which catalog namespace a title lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
    Movie,
    Tv,
}

impl TitleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TitleKind::Movie => "movie",
            TitleKind::Tv => "tv",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "movie" | "movies" | "film" => Some(TitleKind::Movie),
            "tv" | "show" | "series" => Some(TitleKind::Tv),
            _ => None,
        }
    }
}

impl std::fmt::Display for TitleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a person is credited in front of or behind the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditRole {
    Cast,
    Crew,
}

impl CreditRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditRole::Cast => "cast",
            CreditRole::Crew => "crew",
        }
    }
}

/// Reference to a stored movie or show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TitleRef {
    pub kind: TitleKind,
    pub id: CatalogId,
}

impl TitleRef {
    pub fn movie(id: CatalogId) -> Self {
        Self {
            kind: TitleKind::Movie,
            id,
        }
    }

    pub fn tv(id: CatalogId) -> Self {
        Self {
            kind: TitleKind::Tv,
            id,
        }
    }
}

// ── Titles ──────────────────────────────────────────────────────────────────

/// A movie.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Movie {
    pub id: CatalogId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Source file this record was scraped from.
    #[serde(default)]
    pub url: String,
    /// Caller-supplied gallery the file belongs to.
    #[serde(default)]
    pub gallery_uid: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// A television show.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tv {
    pub id: CatalogId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub number_of_episodes: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Season summaries as embedded in the show's detail payload. Never persisted
    /// through the show; each season goes through its own chunk.
    #[serde(default)]
    pub seasons: Vec<Season>,
    /// Most recently scraped episode file.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub gallery_uid: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Tv {
    /// The season summary with the given number, if the show lists one.
    pub fn season(&self, season_number: u32) -> Option<&Season> {
        self.seasons.iter().find(|s| s.season_number == season_number)
    }
}

/// One season of a show.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Season {
    pub id: CatalogId,
    /// Owning show. Not part of the provider payload.
    #[serde(default)]
    pub tv_id: CatalogId,
    #[serde(default)]
    pub season_number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub episode_count: Option<u32>,
    /// Episodes as embedded in the season detail payload.
    #[serde(default)]
    pub episodes: Vec<Episode>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Season {
    /// The episode with the given number, if the season lists one.
    pub fn episode(&self, episode_number: u32) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.episode_number == episode_number)
    }
}

/// One episode of a season.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Episode {
    pub id: CatalogId,
    /// Owning season. Not part of the provider payload.
    #[serde(default)]
    pub season_id: CatalogId,
    #[serde(default)]
    pub season_number: u32,
    #[serde(default)]
    pub episode_number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub still_path: Option<String>,
    #[serde(default)]
    pub air_date: Option<String>,
    /// Source file this episode was scraped from.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

// ── People ──────────────────────────────────────────────────────────────────

/// A cast or crew member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Person {
    pub id: CatalogId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    /// Titles to link as cast on the next chunk. Links only accumulate.
    #[serde(skip)]
    pub cast_titles: Vec<TitleRef>,
    /// Titles to link as crew on the next chunk. Links only accumulate.
    #[serde(skip)]
    pub crew_titles: Vec<TitleRef>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Person {
    /// Queue a link to `title` in the given role.
    pub fn link(&mut self, title: TitleRef, role: CreditRole) {
        let titles = match role {
            CreditRole::Cast => &mut self.cast_titles,
            CreditRole::Crew => &mut self.crew_titles,
        };
        if !titles.contains(&title) {
            titles.push(title);
        }
    }
}

/// One entry in a title's credit list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreditEntry {
    pub id: CatalogId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// Cast and crew lists for one title. Transient; never stored as such.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub id: CatalogId,
    #[serde(default)]
    pub cast: Vec<CreditEntry>,
    #[serde(default)]
    pub crew: Vec<CreditEntry>,
}

impl Credits {
    /// Keep at most `limit` entries of each list.
    pub fn truncate(&mut self, limit: usize) {
        self.cast.truncate(limit);
        self.crew.truncate(limit);
    }

    /// Entries paired with their role, cast first.
    pub fn entries(&self) -> impl Iterator<Item = (&CreditEntry, CreditRole)> {
        self.cast
            .iter()
            .map(|c| (c, CreditRole::Cast))
            .chain(self.crew.iter().map(|c| (c, CreditRole::Crew)))
    }
}

// ── Search ──────────────────────────────────────────────────────────────────

/// One hit from a title search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: CatalogId,
    /// Movie results carry `title`, show results `name`.
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, alias = "first_air_date")]
    pub release_date: Option<String>,
}

/// A page of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<SearchHit>,
    #[serde(default)]
    pub total_results: u32,
}

impl SearchResults {
    /// The top-ranked hit, if any.
    pub fn first(&self) -> Option<&SearchHit> {
        self.results.first()
    }
}
