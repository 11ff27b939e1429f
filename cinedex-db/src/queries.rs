//! Read queries for the library database.

use cinedex_catalog::{
    CatalogId, CreditRole, Episode, Movie, Person, Season, TitleKind, TitleRef, Tv,
};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::operations::OperationError;

// ── Title Lookups ───────────────────────────────────────────────────────────

pub fn find_movie(conn: &Connection, id: CatalogId) -> Result<Option<Movie>, OperationError> {
    conn.query_row(
        "SELECT id, title, original_title, overview, poster_path, backdrop_path,
                release_date, runtime, vote_average, url, gallery_uid,
                created_at, updated_at
         FROM movies WHERE id = ?1",
        params![id],
        row_to_movie,
    )
    .optional()
    .map_err(Into::into)
}

/// Find a show. The returned record's `seasons` list is empty; use
/// [`seasons_for_tv`] for the stored seasons.
pub fn find_tv(conn: &Connection, id: CatalogId) -> Result<Option<Tv>, OperationError> {
    conn.query_row(
        "SELECT id, name, original_name, overview, poster_path, backdrop_path,
                first_air_date, number_of_seasons, number_of_episodes, vote_average,
                url, gallery_uid, created_at, updated_at
         FROM tvs WHERE id = ?1",
        params![id],
        row_to_tv,
    )
    .optional()
    .map_err(Into::into)
}

pub fn find_season(conn: &Connection, id: CatalogId) -> Result<Option<Season>, OperationError> {
    conn.query_row(
        "SELECT id, tv_id, season_number, name, overview, poster_path, air_date,
                episode_count, created_at, updated_at
         FROM seasons WHERE id = ?1",
        params![id],
        row_to_season,
    )
    .optional()
    .map_err(Into::into)
}

pub fn find_episode(conn: &Connection, id: CatalogId) -> Result<Option<Episode>, OperationError> {
    conn.query_row(
        "SELECT id, season_id, season_number, episode_number, name, overview,
                still_path, air_date, url, created_at, updated_at
         FROM episodes WHERE id = ?1",
        params![id],
        row_to_episode,
    )
    .optional()
    .map_err(Into::into)
}

/// Stored seasons of a show, by season number.
pub fn seasons_for_tv(conn: &Connection, tv_id: CatalogId) -> Result<Vec<Season>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, tv_id, season_number, name, overview, poster_path, air_date,
                episode_count, created_at, updated_at
         FROM seasons WHERE tv_id = ?1 ORDER BY season_number",
    )?;
    let rows = stmt.query_map(params![tv_id], row_to_season)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Stored episodes of a season, by episode number.
pub fn episodes_for_season(
    conn: &Connection,
    season_id: CatalogId,
) -> Result<Vec<Episode>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, season_id, season_number, episode_number, name, overview,
                still_path, air_date, url, created_at, updated_at
         FROM episodes WHERE season_id = ?1 ORDER BY episode_number",
    )?;
    let rows = stmt.query_map(params![season_id], row_to_episode)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Person Lookups ──────────────────────────────────────────────────────────

/// Find a person, with their stored cast and crew links filled in.
pub fn find_person(conn: &Connection, id: CatalogId) -> Result<Option<Person>, OperationError> {
    let person = conn
        .query_row(
            "SELECT id, name, profile_path, biography, birthday, place_of_birth,
                    known_for_department, created_at, updated_at
             FROM persons WHERE id = ?1",
            params![id],
            row_to_person,
        )
        .optional()?;

    let Some(mut person) = person else {
        return Ok(None);
    };
    person.cast_titles = person_credits(conn, id, CreditRole::Cast)?;
    person.crew_titles = person_credits(conn, id, CreditRole::Crew)?;
    Ok(Some(person))
}

/// Titles a person is linked to in the given role.
pub fn person_credits(
    conn: &Connection,
    person_id: CatalogId,
    role: CreditRole,
) -> Result<Vec<TitleRef>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT title_kind, title_id FROM person_credits
         WHERE person_id = ?1 AND role = ?2
         ORDER BY title_kind, title_id",
    )?;
    let rows = stmt.query_map(params![person_id, role.as_str()], |row| {
        let kind: String = row.get(0)?;
        Ok((kind, row.get::<_, CatalogId>(1)?))
    })?;

    let mut titles = Vec::new();
    for row in rows {
        let (kind, id) = row?;
        match TitleKind::from_str_loose(&kind) {
            Some(kind) => titles.push(TitleRef { kind, id }),
            None => log::warn!("Skipping credit of person {} with unknown kind '{}'", person_id, kind),
        }
    }
    Ok(titles)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Row counts for each stored entity kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryStats {
    pub movies: i64,
    pub tvs: i64,
    pub seasons: i64,
    pub episodes: i64,
    pub persons: i64,
    pub credits: i64,
}

pub fn library_stats(conn: &Connection) -> Result<LibraryStats, OperationError> {
    conn.query_row(
        "SELECT
            (SELECT COUNT(*) FROM movies),
            (SELECT COUNT(*) FROM tvs),
            (SELECT COUNT(*) FROM seasons),
            (SELECT COUNT(*) FROM episodes),
            (SELECT COUNT(*) FROM persons),
            (SELECT COUNT(*) FROM person_credits)",
        [],
        |row| {
            Ok(LibraryStats {
                movies: row.get(0)?,
                tvs: row.get(1)?,
                seasons: row.get(2)?,
                episodes: row.get(3)?,
                persons: row.get(4)?,
                credits: row.get(5)?,
            })
        },
    )
    .map_err(Into::into)
}

// ── Row Mappers ─────────────────────────────────────────────────────────────

fn row_to_movie(row: &Row) -> rusqlite::Result<Movie> {
    Ok(Movie {
        id: row.get(0)?,
        title: row.get(1)?,
        original_title: row.get(2)?,
        overview: row.get(3)?,
        poster_path: row.get(4)?,
        backdrop_path: row.get(5)?,
        release_date: row.get(6)?,
        runtime: row.get(7)?,
        vote_average: row.get(8)?,
        url: row.get(9)?,
        gallery_uid: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

fn row_to_tv(row: &Row) -> rusqlite::Result<Tv> {
    Ok(Tv {
        id: row.get(0)?,
        name: row.get(1)?,
        original_name: row.get(2)?,
        overview: row.get(3)?,
        poster_path: row.get(4)?,
        backdrop_path: row.get(5)?,
        first_air_date: row.get(6)?,
        number_of_seasons: row.get(7)?,
        number_of_episodes: row.get(8)?,
        vote_average: row.get(9)?,
        seasons: Vec::new(),
        url: row.get(10)?,
        gallery_uid: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

fn row_to_season(row: &Row) -> rusqlite::Result<Season> {
    Ok(Season {
        id: row.get(0)?,
        tv_id: row.get(1)?,
        season_number: row.get(2)?,
        name: row.get(3)?,
        overview: row.get(4)?,
        poster_path: row.get(5)?,
        air_date: row.get(6)?,
        episode_count: row.get(7)?,
        episodes: Vec::new(),
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn row_to_episode(row: &Row) -> rusqlite::Result<Episode> {
    Ok(Episode {
        id: row.get(0)?,
        season_id: row.get(1)?,
        season_number: row.get(2)?,
        episode_number: row.get(3)?,
        name: row.get(4)?,
        overview: row.get(5)?,
        still_path: row.get(6)?,
        air_date: row.get(7)?,
        url: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn row_to_person(row: &Row) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get(0)?,
        name: row.get(1)?,
        profile_path: row.get(2)?,
        biography: row.get(3)?,
        birthday: row.get(4)?,
        place_of_birth: row.get(5)?,
        known_for_department: row.get(6)?,
        cast_titles: Vec::new(),
        crew_titles: Vec::new(),
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}
