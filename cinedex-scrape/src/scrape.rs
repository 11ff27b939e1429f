//! Per-file scrape orchestration.
//!
//! One call handles one file, strictly in sequence: path extraction, catalog
//! lookups, the person pass, then the title chain is chunked. Extraction and
//! catalog failures abort the file before its title chain is written.

use cinedex_catalog::{
    CatalogId, Credits, PathParser, PathSignature, TitleKind, TitleRef,
};
use cinedex_db::{Chunked, Connection, chunk_episode, chunk_movie, chunk_season, chunk_tv};
use cinedex_tmdb::{Catalog, ImageKind};

use crate::error::ScrapeError;
use crate::images::mirror_image;
use crate::progress::ScrapeProgress;
use crate::reconcile::{PersonStats, reconcile_persons};
use crate::settings::ScrapeOptions;

/// What one successful scrape stored.
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    pub kind: TitleKind,
    /// Catalog id of the movie or show.
    pub id: CatalogId,
    pub title: String,
    /// Search title for movies, season/episode pair for shows.
    pub signature: PathSignature,
    pub outcome: Chunked,
    pub persons: PersonStats,
}

/// Result for one file of a batch.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: String,
    pub result: Result<ScrapeReport, ScrapeError>,
}

/// Scrapes media files into a library database through a [`Catalog`].
pub struct Scraper<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
    conn: &'a Connection,
    parser: PathParser,
    options: ScrapeOptions,
}

impl<'a, C: Catalog + ?Sized> Scraper<'a, C> {
    pub fn new(
        catalog: &'a C,
        conn: &'a Connection,
        parser: PathParser,
        options: ScrapeOptions,
    ) -> Self {
        Self {
            catalog,
            conn,
            parser,
            options,
        }
    }

    /// Scrape one file as `kind`.
    pub fn scrape(
        &self,
        kind: TitleKind,
        file_path: &str,
        gallery_uid: &str,
    ) -> Result<ScrapeReport, ScrapeError> {
        match kind {
            TitleKind::Movie => self.scrape_movie(file_path, gallery_uid),
            TitleKind::Tv => self.scrape_tv(file_path, gallery_uid),
        }
    }

    /// Scrape every file in order. A failing file is reported and the batch
    /// moves on.
    pub fn scrape_batch<P: AsRef<str>>(
        &self,
        kind: TitleKind,
        paths: &[P],
        gallery_uid: &str,
        progress: &dyn ScrapeProgress,
    ) -> Vec<FileOutcome> {
        let total = paths.len();
        let mut outcomes = Vec::with_capacity(total);

        for (i, path) in paths.iter().enumerate() {
            let path = path.as_ref();
            progress.on_file(i + 1, total, path);

            let result = self.scrape(kind, path, gallery_uid);
            match &result {
                Ok(report) => progress.on_scraped(path, report),
                Err(e) => progress.on_failed(path, e),
            }
            outcomes.push(FileOutcome {
                path: path.to_string(),
                result,
            });
        }

        outcomes
    }

    // ── Movies ──────────────────────────────────────────────────────────────

    /// Scrape a movie file. Returns the movie's catalog id in the report.
    pub fn scrape_movie(
        &self,
        file_path: &str,
        gallery_uid: &str,
    ) -> Result<ScrapeReport, ScrapeError> {
        let query = self.parser.movie_title(file_path)?;
        let id = self.first_hit(&query, TitleKind::Movie)?;

        let mut movie = self.catalog.movie(id)?;
        let credits = self.credits(TitleKind::Movie, id)?;
        let persons = reconcile_persons(
            self.conn,
            self.catalog,
            &credits,
            TitleRef::movie(id),
            self.options.person_refresh(TitleKind::Movie),
            self.options.download_images,
        );

        movie.url = file_path.to_string();
        movie.gallery_uid = gallery_uid.to_string();
        let outcome = chunk_movie(self.conn, &movie)?;

        self.mirror(ImageKind::Poster, movie.poster_path.as_deref());
        self.mirror(ImageKind::Backdrop, movie.backdrop_path.as_deref());

        log::info!("Scraped movie {} ({}) from {}", movie.id, movie.title, file_path);
        Ok(ScrapeReport {
            kind: TitleKind::Movie,
            id: movie.id,
            title: movie.title,
            signature: PathSignature::Title(query),
            outcome,
            persons,
        })
    }

    // ── Shows ───────────────────────────────────────────────────────────────

    /// Scrape one episode file of a show. Returns the show's catalog id in
    /// the report.
    pub fn scrape_tv(&self, file_path: &str, gallery_uid: &str) -> Result<ScrapeReport, ScrapeError> {
        let show_name = self.parser.show_name(file_path)?;
        let id = self.first_hit(&show_name, TitleKind::Tv)?;

        let mut tv = self.catalog.tv(id)?;
        let credits = self.credits(TitleKind::Tv, id)?;
        let persons = reconcile_persons(
            self.conn,
            self.catalog,
            &credits,
            TitleRef::tv(id),
            self.options.person_refresh(TitleKind::Tv),
            self.options.download_images,
        );

        let (season_number, episode_number) = self.parser.season_episode(file_path)?;
        let mut season = self.catalog.season(id, season_number)?;

        let summary = tv.season(season_number).ok_or_else(|| {
            ScrapeError::not_found(format!("season {} of tv {}", season_number, id))
        })?;
        season.tv_id = tv.id;
        season.season_number = season_number;
        if season.episode_count.is_none() {
            season.episode_count = summary.episode_count;
        }

        let mut episode = season.episode(episode_number).cloned().ok_or_else(|| {
            ScrapeError::not_found(format!(
                "episode {} of season {} of tv {}",
                episode_number, season_number, id
            ))
        })?;
        episode.season_id = season.id;
        episode.season_number = season_number;
        episode.url = file_path.to_string();

        tv.url = file_path.to_string();
        tv.gallery_uid = gallery_uid.to_string();
        tv.seasons.clear();
        season.episodes.clear();

        let tx = self.conn.unchecked_transaction()?;
        let outcome = chunk_tv(&tx, &tv)?;
        chunk_season(&tx, &season)?;
        chunk_episode(&tx, &episode)?;
        tx.commit()?;

        self.mirror(ImageKind::Poster, tv.poster_path.as_deref());
        self.mirror(ImageKind::Backdrop, tv.backdrop_path.as_deref());
        self.mirror(ImageKind::Season, season.poster_path.as_deref());
        self.mirror(ImageKind::Still, episode.still_path.as_deref());

        let signature = PathSignature::SeasonEpisode {
            season: season_number,
            episode: episode_number,
        };
        log::info!("Scraped tv {} ({}) {} from {}", tv.id, tv.name, signature, file_path);
        Ok(ScrapeReport {
            kind: TitleKind::Tv,
            id: tv.id,
            title: tv.name,
            signature,
            outcome,
            persons,
        })
    }

    // ── Helpers ─────────────────────────────────────────────────────────────

    /// Catalog id of the top search hit.
    fn first_hit(&self, query: &str, kind: TitleKind) -> Result<CatalogId, ScrapeError> {
        let results = self.catalog.search(query, kind)?;
        let hit = results
            .first()
            .ok_or_else(|| ScrapeError::not_found(format!("{} search for '{}'", kind, query)))?;
        log::debug!("'{}' matched {} {} ({})", query, kind, hit.id, hit.title);
        Ok(hit.id)
    }

    /// Credits of a title, bounded to the credit limit before anyone is fetched.
    fn credits(&self, kind: TitleKind, id: CatalogId) -> Result<Credits, ScrapeError> {
        let mut credits = self.catalog.credits(kind, id)?;
        credits.truncate(self.options.credit_limit);
        Ok(credits)
    }

    fn mirror(&self, kind: ImageKind, path: Option<&str>) {
        if self.options.download_images {
            mirror_image(self.catalog, kind, path);
        }
    }
}
