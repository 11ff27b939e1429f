use cinedex_catalog::*;
use cinedex_db::*;

fn test_movie() -> Movie {
    Movie {
        id: 603,
        title: "黑客帝国".to_string(),
        original_title: Some("The Matrix".to_string()),
        overview: Some("A hacker learns the truth.".to_string()),
        poster_path: Some("/matrix.jpg".to_string()),
        release_date: Some("1999-03-30".to_string()),
        runtime: Some(136),
        vote_average: Some(8.2),
        url: "/media/movies/The.Matrix.1999.mkv".to_string(),
        gallery_uid: "g-1".to_string(),
        ..Default::default()
    }
}

fn test_tv() -> Tv {
    Tv {
        id: 1399,
        name: "权力的游戏".to_string(),
        number_of_seasons: Some(8),
        ..Default::default()
    }
}

fn test_season() -> Season {
    Season {
        id: 3624,
        tv_id: 1399,
        season_number: 1,
        name: "第 1 季".to_string(),
        episode_count: Some(10),
        ..Default::default()
    }
}

fn test_episode() -> Episode {
    Episode {
        id: 63056,
        season_id: 3624,
        season_number: 1,
        episode_number: 1,
        name: "凛冬将至".to_string(),
        url: "/media/tv/GoT/S01E01.mkv".to_string(),
        ..Default::default()
    }
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}

// ── Movies ──────────────────────────────────────────────────────────────────

#[test]
fn chunk_movie_creates_then_updates() {
    let conn = open_memory().unwrap();
    let mut movie = test_movie();

    assert_eq!(chunk_movie(&conn, &movie).unwrap(), Chunked::Created);
    movie.overview = Some("Revised".to_string());
    assert_eq!(chunk_movie(&conn, &movie).unwrap(), Chunked::Updated);

    assert_eq!(count(&conn, "movies"), 1);
    let stored = find_movie(&conn, 603).unwrap().unwrap();
    assert_eq!(stored.overview.as_deref(), Some("Revised"));
    assert_eq!(stored.original_title.as_deref(), Some("The Matrix"));
    assert_eq!(stored.runtime, Some(136));
    assert_eq!(stored.gallery_uid, "g-1");
}

#[test]
fn chunk_movie_preserves_created_at() {
    let conn = open_memory().unwrap();
    let mut movie = test_movie();
    movie.created_at = "2020-01-01 00:00:00".to_string();
    chunk_movie(&conn, &movie).unwrap();

    movie.created_at = "2030-06-15 12:00:00".to_string();
    movie.title = "Matrix".to_string();
    chunk_movie(&conn, &movie).unwrap();

    let stored = find_movie(&conn, 603).unwrap().unwrap();
    assert_eq!(stored.created_at, "2020-01-01 00:00:00");
    assert_eq!(stored.title, "Matrix");
    assert!(!stored.updated_at.is_empty());
}

#[test]
fn chunk_movie_without_created_at_stamps_now() {
    let conn = open_memory().unwrap();
    chunk_movie(&conn, &test_movie()).unwrap();

    let stored = find_movie(&conn, 603).unwrap().unwrap();
    assert_eq!(stored.created_at.len(), "2024-01-01 00:00:00".len());
    assert_eq!(stored.created_at, stored.updated_at);
}

// ── Shows ───────────────────────────────────────────────────────────────────

#[test]
fn chunk_tv_season_episode_in_order() {
    let conn = open_memory().unwrap();
    assert_eq!(chunk_tv(&conn, &test_tv()).unwrap(), Chunked::Created);
    assert_eq!(chunk_season(&conn, &test_season()).unwrap(), Chunked::Created);
    assert_eq!(chunk_episode(&conn, &test_episode()).unwrap(), Chunked::Created);

    let episode = find_episode(&conn, 63056).unwrap().unwrap();
    assert_eq!(episode.season_id, 3624);
    assert_eq!(episode.url, "/media/tv/GoT/S01E01.mkv");

    let season = find_season(&conn, 3624).unwrap().unwrap();
    assert_eq!(season.tv_id, 1399);
    assert_eq!(season.episode_count, Some(10));
}

#[test]
fn chunk_tv_ignores_embedded_seasons() {
    let conn = open_memory().unwrap();
    let mut tv = test_tv();
    tv.seasons = vec![test_season()];
    chunk_tv(&conn, &tv).unwrap();

    assert_eq!(count(&conn, "tvs"), 1);
    assert_eq!(count(&conn, "seasons"), 0);
}

#[test]
fn season_requires_stored_show() {
    let conn = open_memory().unwrap();
    assert!(chunk_season(&conn, &test_season()).is_err());
}

#[test]
fn rechunking_show_tree_is_idempotent() {
    let conn = open_memory().unwrap();
    for _ in 0..2 {
        chunk_tv(&conn, &test_tv()).unwrap();
        chunk_season(&conn, &test_season()).unwrap();
        chunk_episode(&conn, &test_episode()).unwrap();
    }
    assert_eq!(count(&conn, "tvs"), 1);
    assert_eq!(count(&conn, "seasons"), 1);
    assert_eq!(count(&conn, "episodes"), 1);
}

#[test]
fn chunk_season_and_episode_preserve_created_at() {
    let conn = open_memory().unwrap();
    chunk_tv(&conn, &test_tv()).unwrap();

    let mut season = test_season();
    season.created_at = "2021-02-03 04:05:06".to_string();
    chunk_season(&conn, &season).unwrap();
    season.created_at.clear();
    assert_eq!(chunk_season(&conn, &season).unwrap(), Chunked::Updated);
    assert_eq!(
        find_season(&conn, 3624).unwrap().unwrap().created_at,
        "2021-02-03 04:05:06"
    );

    let mut episode = test_episode();
    episode.created_at = "2021-02-03 04:05:06".to_string();
    chunk_episode(&conn, &episode).unwrap();
    episode.created_at = "2099-01-01 00:00:00".to_string();
    chunk_episode(&conn, &episode).unwrap();
    assert_eq!(
        find_episode(&conn, 63056).unwrap().unwrap().created_at,
        "2021-02-03 04:05:06"
    );
}

// ── Persons ─────────────────────────────────────────────────────────────────

#[test]
fn chunk_person_links_accumulate() {
    let conn = open_memory().unwrap();
    let mut person = Person {
        id: 6384,
        name: "Keanu Reeves".to_string(),
        ..Default::default()
    };
    person.link(TitleRef::movie(603), CreditRole::Cast);
    assert_eq!(chunk_person(&conn, &person).unwrap(), Chunked::Created);
    assert!(person_exists(&conn, 6384).unwrap());

    // A later chunk that only knows about a different title
    let mut later = Person {
        id: 6384,
        name: "Keanu Reeves".to_string(),
        ..Default::default()
    };
    later.link(TitleRef::tv(1399), CreditRole::Crew);
    later.link(TitleRef::movie(603), CreditRole::Cast);
    assert_eq!(chunk_person(&conn, &later).unwrap(), Chunked::Updated);

    let stored = find_person(&conn, 6384).unwrap().unwrap();
    assert_eq!(stored.cast_titles, vec![TitleRef::movie(603)]);
    assert_eq!(stored.crew_titles, vec![TitleRef::tv(1399)]);
    assert_eq!(count(&conn, "person_credits"), 2);
}

#[test]
fn chunk_person_preserves_created_at() {
    let conn = open_memory().unwrap();
    let mut person = Person {
        id: 1,
        name: "A".to_string(),
        created_at: "2019-09-09 09:09:09".to_string(),
        ..Default::default()
    };
    chunk_person(&conn, &person).unwrap();
    person.created_at = "2030-01-01 00:00:00".to_string();
    person.biography = Some("bio".to_string());
    chunk_person(&conn, &person).unwrap();

    let stored = find_person(&conn, 1).unwrap().unwrap();
    assert_eq!(stored.created_at, "2019-09-09 09:09:09");
    assert_eq!(stored.biography.as_deref(), Some("bio"));
}

#[test]
fn person_exists_is_false_for_unknown_id() {
    let conn = open_memory().unwrap();
    assert!(!person_exists(&conn, 42).unwrap());
}
