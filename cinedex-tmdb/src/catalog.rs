use std::path::PathBuf;

use cinedex_catalog::{CatalogId, Credits, Movie, Person, SearchResults, Season, TitleKind, Tv};

use crate::error::CatalogError;
use crate::images::ImageKind;

/// Read access to the metadata provider.
///
/// [`TmdbClient`](crate::TmdbClient) is the production implementation;
/// scrape orchestration only ever talks to this trait.
pub trait Catalog {
    /// Search titles by free text. Always the first page.
    fn search(&self, query: &str, kind: TitleKind) -> Result<SearchResults, CatalogError>;

    /// Full movie details.
    fn movie(&self, id: CatalogId) -> Result<Movie, CatalogError>;

    /// Full show details, including season summaries.
    fn tv(&self, id: CatalogId) -> Result<Tv, CatalogError>;

    /// Full season details, including episodes.
    fn season(&self, tv_id: CatalogId, season_number: u32) -> Result<Season, CatalogError>;

    /// Untruncated cast and crew lists for a title.
    fn credits(&self, kind: TitleKind, id: CatalogId) -> Result<Credits, CatalogError>;

    /// Person details.
    fn person(&self, id: CatalogId) -> Result<Person, CatalogError>;

    /// Mirror a provider image locally, returning where it was written.
    fn download_image(&self, kind: ImageKind, path: &str) -> Result<PathBuf, CatalogError>;
}
