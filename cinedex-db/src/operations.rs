//! Create-or-update ("chunk") operations for every stored entity.
//!
//! Each chunk looks the record up by provider id. A missing record is
//! inserted; an existing one has every field replaced except its creation
//! timestamp, which is carried forward from the stored row.

use cinedex_catalog::{CatalogId, CreditRole, Episode, Movie, Person, Season, TitleRef, Tv};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Whether a chunk inserted a new row or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunked {
    Created,
    Updated,
}

/// Current time in the `YYYY-MM-DD HH:MM:SS` form SQLite's `datetime()` uses.
pub(crate) fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Decide the creation timestamp for a chunk of `table` row `id`.
///
/// Returns the stored value when the row exists, otherwise the incoming
/// value (or `now` when the incoming record has none).
fn carry_created_at(
    conn: &Connection,
    table: &'static str,
    id: CatalogId,
    incoming: &str,
    now: &str,
) -> Result<(String, Chunked), OperationError> {
    let stored: Option<String> = conn
        .query_row(
            &format!("SELECT created_at FROM {table} WHERE id = ?1"),
            [id],
            |row| row.get(0),
        )
        .optional()?;

    Ok(match stored {
        Some(created_at) => (created_at, Chunked::Updated),
        None if incoming.is_empty() => (now.to_string(), Chunked::Created),
        None => (incoming.to_string(), Chunked::Created),
    })
}

// ── Movie Operations ────────────────────────────────────────────────────────

pub fn chunk_movie(conn: &Connection, movie: &Movie) -> Result<Chunked, OperationError> {
    let now = timestamp();
    let (created_at, outcome) = carry_created_at(conn, "movies", movie.id, &movie.created_at, &now)?;

    conn.execute(
        "INSERT INTO movies (id, title, original_title, overview, poster_path, backdrop_path,
                             release_date, runtime, vote_average, url, gallery_uid,
                             created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
         ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            original_title = excluded.original_title,
            overview = excluded.overview,
            poster_path = excluded.poster_path,
            backdrop_path = excluded.backdrop_path,
            release_date = excluded.release_date,
            runtime = excluded.runtime,
            vote_average = excluded.vote_average,
            url = excluded.url,
            gallery_uid = excluded.gallery_uid,
            created_at = excluded.created_at,
            updated_at = excluded.updated_at",
        params![
            movie.id,
            movie.title,
            movie.original_title,
            movie.overview,
            movie.poster_path,
            movie.backdrop_path,
            movie.release_date,
            movie.runtime,
            movie.vote_average,
            movie.url,
            movie.gallery_uid,
            created_at,
            now,
        ],
    )?;

    log::debug!("{:?} movie {} ({})", outcome, movie.id, movie.title);
    Ok(outcome)
}

// ── TV Operations ───────────────────────────────────────────────────────────

/// Chunk a show's own fields. Embedded seasons are ignored.
pub fn chunk_tv(conn: &Connection, tv: &Tv) -> Result<Chunked, OperationError> {
    let now = timestamp();
    let (created_at, outcome) = carry_created_at(conn, "tvs", tv.id, &tv.created_at, &now)?;

    conn.execute(
        "INSERT INTO tvs (id, name, original_name, overview, poster_path, backdrop_path,
                          first_air_date, number_of_seasons, number_of_episodes, vote_average,
                          url, gallery_uid, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            original_name = excluded.original_name,
            overview = excluded.overview,
            poster_path = excluded.poster_path,
            backdrop_path = excluded.backdrop_path,
            first_air_date = excluded.first_air_date,
            number_of_seasons = excluded.number_of_seasons,
            number_of_episodes = excluded.number_of_episodes,
            vote_average = excluded.vote_average,
            url = excluded.url,
            gallery_uid = excluded.gallery_uid,
            created_at = excluded.created_at,
            updated_at = excluded.updated_at",
        params![
            tv.id,
            tv.name,
            tv.original_name,
            tv.overview,
            tv.poster_path,
            tv.backdrop_path,
            tv.first_air_date,
            tv.number_of_seasons,
            tv.number_of_episodes,
            tv.vote_average,
            tv.url,
            tv.gallery_uid,
            created_at,
            now,
        ],
    )?;

    log::debug!("{:?} tv {} ({})", outcome, tv.id, tv.name);
    Ok(outcome)
}

/// Chunk a season's own fields. The owning show must already be stored.
pub fn chunk_season(conn: &Connection, season: &Season) -> Result<Chunked, OperationError> {
    let now = timestamp();
    let (created_at, outcome) =
        carry_created_at(conn, "seasons", season.id, &season.created_at, &now)?;

    conn.execute(
        "INSERT INTO seasons (id, tv_id, season_number, name, overview, poster_path, air_date,
                              episode_count, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
         ON CONFLICT(id) DO UPDATE SET
            tv_id = excluded.tv_id,
            season_number = excluded.season_number,
            name = excluded.name,
            overview = excluded.overview,
            poster_path = excluded.poster_path,
            air_date = excluded.air_date,
            episode_count = excluded.episode_count,
            created_at = excluded.created_at,
            updated_at = excluded.updated_at",
        params![
            season.id,
            season.tv_id,
            season.season_number,
            season.name,
            season.overview,
            season.poster_path,
            season.air_date,
            season.episode_count,
            created_at,
            now,
        ],
    )?;

    log::debug!(
        "{:?} season {} (tv {}, S{:02})",
        outcome,
        season.id,
        season.tv_id,
        season.season_number
    );
    Ok(outcome)
}

/// Chunk an episode. The owning season must already be stored.
pub fn chunk_episode(conn: &Connection, episode: &Episode) -> Result<Chunked, OperationError> {
    let now = timestamp();
    let (created_at, outcome) =
        carry_created_at(conn, "episodes", episode.id, &episode.created_at, &now)?;

    conn.execute(
        "INSERT INTO episodes (id, season_id, season_number, episode_number, name, overview,
                               still_path, air_date, url, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
         ON CONFLICT(id) DO UPDATE SET
            season_id = excluded.season_id,
            season_number = excluded.season_number,
            episode_number = excluded.episode_number,
            name = excluded.name,
            overview = excluded.overview,
            still_path = excluded.still_path,
            air_date = excluded.air_date,
            url = excluded.url,
            created_at = excluded.created_at,
            updated_at = excluded.updated_at",
        params![
            episode.id,
            episode.season_id,
            episode.season_number,
            episode.episode_number,
            episode.name,
            episode.overview,
            episode.still_path,
            episode.air_date,
            episode.url,
            created_at,
            now,
        ],
    )?;

    log::debug!(
        "{:?} episode {} (season {}, E{:02})",
        outcome,
        episode.id,
        episode.season_id,
        episode.episode_number
    );
    Ok(outcome)
}

// ── Person Operations ───────────────────────────────────────────────────────

/// Whether a person with this id is stored.
pub fn person_exists(conn: &Connection, id: CatalogId) -> Result<bool, OperationError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM persons WHERE id = ?1)",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Chunk a person together with their queued title links.
///
/// Links are only ever added; titles linked by earlier chunks stay linked.
pub fn chunk_person(conn: &Connection, person: &Person) -> Result<Chunked, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let now = timestamp();
    let (created_at, outcome) =
        carry_created_at(&tx, "persons", person.id, &person.created_at, &now)?;

    tx.execute(
        "INSERT INTO persons (id, name, profile_path, biography, birthday, place_of_birth,
                              known_for_department, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            profile_path = excluded.profile_path,
            biography = excluded.biography,
            birthday = excluded.birthday,
            place_of_birth = excluded.place_of_birth,
            known_for_department = excluded.known_for_department,
            created_at = excluded.created_at,
            updated_at = excluded.updated_at",
        params![
            person.id,
            person.name,
            person.profile_path,
            person.biography,
            person.birthday,
            person.place_of_birth,
            person.known_for_department,
            created_at,
            now,
        ],
    )?;

    link_titles(&tx, person.id, &person.cast_titles, CreditRole::Cast)?;
    link_titles(&tx, person.id, &person.crew_titles, CreditRole::Crew)?;
    tx.commit()?;

    log::debug!("{:?} person {} ({})", outcome, person.id, person.name);
    Ok(outcome)
}

fn link_titles(
    conn: &Connection,
    person_id: CatalogId,
    titles: &[TitleRef],
    role: CreditRole,
) -> Result<(), OperationError> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR IGNORE INTO person_credits (person_id, title_kind, title_id, role)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    for title in titles {
        stmt.execute(params![person_id, title.kind.as_str(), title.id, role.as_str()])?;
    }
    Ok(())
}
